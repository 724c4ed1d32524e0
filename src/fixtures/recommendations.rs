//! Recommendation Fixtures

use serde::Deserialize;
use smallvec::SmallVec;

use crate::{
    fixtures::{FixtureError, products::parse_money},
    products::ProductId,
    recommendations::{Impact, PricingRecommendation},
};

/// Wrapper for recommendations in YAML
#[derive(Debug, Deserialize)]
pub struct RecommendationsFixture {
    /// Recommendations, in file order
    pub recommendations: Vec<RecommendationFixture>,
}

/// Recommendation Fixture
#[derive(Debug, Deserialize)]
pub struct RecommendationFixture {
    /// Product the recommendation applies to
    pub product: ProductId,

    /// Recommended price (e.g., "185 USD")
    pub recommended_price: String,

    /// Confidence in percent
    pub confidence: u8,

    /// Potential additional revenue (e.g., "12400 USD")
    pub potential_revenue: String,

    /// Reasoning
    #[serde(default)]
    pub reasoning: String,

    /// Expected impact
    pub impact: Impact,

    /// Implementation timeframe
    #[serde(default)]
    pub timeframe: String,

    /// Contributing factors
    #[serde(default)]
    pub factors: Vec<String>,
}

impl TryFrom<RecommendationFixture> for PricingRecommendation<'_> {
    type Error = FixtureError;

    fn try_from(fixture: RecommendationFixture) -> Result<Self, Self::Error> {
        Ok(PricingRecommendation {
            product: fixture.product,
            recommended_price: parse_money(&fixture.recommended_price)?,
            confidence: fixture.confidence,
            potential_revenue: parse_money(&fixture.potential_revenue)?,
            reasoning: fixture.reasoning,
            impact: fixture.impact,
            timeframe: fixture.timeframe,
            factors: SmallVec::from_vec(fixture.factors),
        })
    }
}
