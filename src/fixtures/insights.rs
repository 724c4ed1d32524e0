//! Insight Fixtures

use serde::Deserialize;

use crate::insights::{Insight, InsightKind};

/// Wrapper for insights in YAML
#[derive(Debug, Deserialize)]
pub struct InsightsFixture {
    /// Insights, in display order
    pub insights: Vec<InsightFixture>,
}

/// Insight Fixture
#[derive(Debug, Deserialize)]
pub struct InsightFixture {
    /// Headline
    pub title: String,

    /// What was observed
    #[serde(default)]
    pub description: String,

    /// Kind of signal (opportunity, threat, warning)
    #[serde(rename = "type")]
    pub kind: InsightKind,

    /// Confidence in percent
    pub confidence: u8,

    /// Suggested response
    #[serde(default)]
    pub action: String,
}

impl From<InsightFixture> for Insight {
    fn from(fixture: InsightFixture) -> Self {
        Insight {
            title: fixture.title,
            description: fixture.description,
            kind: fixture.kind,
            confidence: fixture.confidence,
            action: fixture.action,
        }
    }
}
