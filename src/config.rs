//! Command-line configuration

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

use crate::{filter::ProductFilter, session::Theme};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Fixture location settings.
#[derive(Debug, Args)]
pub struct FixtureConfig {
    /// Directory containing `products/` and `recommendations/` fixture files
    #[arg(long, env = "VITRINE_FIXTURES", default_value = "./fixtures")]
    pub fixtures: PathBuf,

    /// Fixture set to load
    #[arg(short, long, env = "VITRINE_SET", default_value = "fashion")]
    pub set: String,
}

/// What to show.
#[derive(Debug, Args)]
pub struct ViewConfig {
    /// Search products by name or brand
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Category to show, or "all"
    #[arg(short, long, default_value = "all")]
    pub category: String,

    /// Competitor price alerts to report
    #[arg(long, env = "VITRINE_PRICE_ALERTS", default_value_t = 3)]
    pub price_alerts: u32,

    /// Colour theme
    #[arg(long, env = "VITRINE_THEME", value_enum, default_value_t = Theme::Light)]
    pub theme: Theme,

    /// Include pricing recommendations
    #[arg(short, long)]
    pub recommendations: bool,

    /// Include market insights
    #[arg(short, long)]
    pub insights: bool,
}

impl ViewConfig {
    /// The product filter described by the query and category.
    pub fn filter(&self) -> ProductFilter {
        ProductFilter::new(&self.query, self.category.as_str())
    }
}

/// Vitrine configuration
#[derive(Debug, Parser)]
#[command(name = "vitrine", about = "Fashion pricing catalog report", long_about = None)]
pub struct Config {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Fixture settings.
    #[command(flatten)]
    pub fixtures: FixtureConfig,

    /// View settings.
    #[command(flatten)]
    pub view: ViewConfig,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
