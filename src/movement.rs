//! Price movements and display tones

use rust_decimal::Decimal;

use crate::{insights::InsightKind, products::Trend, recommendations::Impact};

/// Direction of a stored percentage figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceMovement {
    /// Positive percentage
    Increase,

    /// Negative percentage
    Decrease,

    /// Exactly zero
    Unchanged,
}

impl PriceMovement {
    /// Classifies a percentage by its sign.
    pub fn from_percent(percent: Decimal) -> Self {
        if percent.is_zero() {
            PriceMovement::Unchanged
        } else if percent.is_sign_positive() {
            PriceMovement::Increase
        } else {
            PriceMovement::Decrease
        }
    }
}

/// Display tone for a value, independent of any particular renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Good news (price up, trend up, high impact, opportunity)
    Positive,

    /// Bad news (price down, trend down, threat)
    Negative,

    /// Worth noticing, neither good nor bad
    Accent,

    /// Nothing to report
    Muted,
}

impl From<PriceMovement> for Tone {
    fn from(movement: PriceMovement) -> Self {
        match movement {
            PriceMovement::Increase => Tone::Positive,
            PriceMovement::Decrease => Tone::Negative,
            PriceMovement::Unchanged => Tone::Muted,
        }
    }
}

impl From<Trend> for Tone {
    fn from(trend: Trend) -> Self {
        match trend {
            Trend::Up => Tone::Positive,
            Trend::Down => Tone::Negative,
            Trend::Stable => Tone::Muted,
        }
    }
}

impl From<Impact> for Tone {
    fn from(impact: Impact) -> Self {
        match impact {
            Impact::High => Tone::Positive,
            Impact::Medium => Tone::Accent,
            Impact::Low => Tone::Muted,
        }
    }
}

impl From<InsightKind> for Tone {
    fn from(kind: InsightKind) -> Self {
        match kind {
            InsightKind::Opportunity => Tone::Positive,
            InsightKind::Threat => Tone::Negative,
            InsightKind::Warning => Tone::Accent,
        }
    }
}

/// Formats percent points with an explicit `+` for positive values (e.g. `+16%`, `-5.3%`, `0%`).
pub fn format_percent_points(percent: Decimal) -> String {
    let sign = match PriceMovement::from_percent(percent) {
        PriceMovement::Increase => "+",
        PriceMovement::Decrease | PriceMovement::Unchanged => "",
    };

    format!("{sign}{}%", percent.normalize())
}
