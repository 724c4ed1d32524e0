//! Market insights
//!
//! Catalog-wide observations shown beside the pricing recommendations. Unlike
//! recommendations they are not tied to a product or priced, so they need no catalog to
//! validate against.

use serde::Deserialize;
use thiserror::Error;

/// Errors related to market insights.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InsightError {
    /// Confidence must be a percentage between 0 and 100.
    #[error("Insight {title:?} has confidence {confidence}%, expected 0-100%")]
    InvalidConfidence {
        /// Insight title
        title: String,

        /// Confidence as loaded
        confidence: u8,
    },
}

/// What kind of signal an insight is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    /// Room to raise prices or volume
    Opportunity,

    /// Competitor or market pressure
    Threat,

    /// Something needs attention soon
    Warning,
}

impl InsightKind {
    /// Lowercase label.
    pub fn label(self) -> &'static str {
        match self {
            InsightKind::Opportunity => "opportunity",
            InsightKind::Threat => "threat",
            InsightKind::Warning => "warning",
        }
    }
}

/// A market observation with a suggested action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    /// Short headline
    pub title: String,

    /// What was observed
    pub description: String,

    /// Kind of signal
    pub kind: InsightKind,

    /// Confidence, in percent
    pub confidence: u8,

    /// Suggested response
    pub action: String,
}

/// Validated market insights, in their original order.
#[derive(Debug, Clone, Default)]
pub struct Insights {
    items: Vec<Insight>,
}

impl Insights {
    /// Validate a list of insights.
    ///
    /// # Errors
    ///
    /// Returns [`InsightError::InvalidConfidence`] if an insight's confidence exceeds 100%.
    pub fn new(items: impl Into<Vec<Insight>>) -> Result<Self, InsightError> {
        let items = items.into();

        if let Some(invalid) = items.iter().find(|insight| insight.confidence > 100) {
            return Err(InsightError::InvalidConfidence {
                title: invalid.title.clone(),
                confidence: invalid.confidence,
            });
        }

        Ok(Self { items })
    }

    /// Number of insights.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if there are no insights.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over insights in their original order.
    pub fn iter(&self) -> impl Iterator<Item = &Insight> {
        self.items.iter()
    }

    /// Insights of one kind, in their original order.
    pub fn of_kind(&self, kind: InsightKind) -> impl Iterator<Item = &Insight> {
        self.items.iter().filter(move |insight| insight.kind == kind)
    }
}
