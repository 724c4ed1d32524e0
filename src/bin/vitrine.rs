//! Vitrine
//!
//! Prints the product analytics report for a fixture set.
//!
//! Use `-s` to pick the fixture set, `-q` to search by name or brand, `-c` to pick a category
//! and `-r` and `-i` to include pricing recommendations and market insights.

use std::io;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vitrine::{
    config::{Config, LogFormat, LoggingConfig},
    fixtures::Fixture,
    report::Report,
    session::Session,
};

/// Vitrine entry point
pub fn main() -> Result<()> {
    let config = Config::load().unwrap_or_else(|err| err.exit());

    init_logging(&config.logging);

    let fixture = Fixture::from_set_in(&config.fixtures.fixtures, &config.fixtures.set)?;
    let catalog = fixture.catalog()?;
    let recommendations = fixture.recommendations(&catalog)?;

    info!(
        set = %config.fixtures.set,
        products = catalog.len(),
        recommendations = recommendations.len(),
        insights = fixture.insights().len(),
        "fixture set loaded"
    );

    let filter = config.view.filter();
    let mut report = Report::new(&catalog, &filter, config.view.price_alerts)?;

    if config.view.recommendations {
        report = report.with_recommendations(&recommendations);
    }

    if config.view.insights {
        report = report.with_insights(fixture.insights());
    }

    let session = Session::signed_in(config.view.theme);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    report.write_to(&mut handle, &session)?;

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    match logging.log_format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }
}
