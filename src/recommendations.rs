//! Pricing recommendations

use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use serde::Deserialize;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{catalog::Catalog, products::ProductId};

/// Errors related to recommendations.
#[derive(Debug, Error, PartialEq)]
pub enum RecommendationError {
    /// The recommendation refers to a product that is not in the catalog.
    #[error("Recommendation refers to unknown product {0}")]
    UnknownProduct(ProductId),

    /// Confidence must be a percentage between 0 and 100.
    #[error("Recommendation for product {0} has confidence {1}%, expected 0-100%")]
    InvalidConfidence(ProductId, u8),

    /// The recommendation is priced in another currency than the catalog.
    #[error("Recommendation for product {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),
}

/// Expected impact of applying a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    /// High impact
    High,

    /// Medium impact
    Medium,

    /// Low impact
    Low,
}

impl Impact {
    /// Lowercase label.
    pub fn label(self) -> &'static str {
        match self {
            Impact::High => "high",
            Impact::Medium => "medium",
            Impact::Low => "low",
        }
    }
}

/// A suggested price for one catalog product.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingRecommendation<'a> {
    /// Product the recommendation applies to
    pub product: ProductId,

    /// Suggested selling price
    pub recommended_price: Money<'a, Currency>,

    /// Confidence, in percent
    pub confidence: u8,

    /// Estimated additional revenue
    pub potential_revenue: Money<'a, Currency>,

    /// Why the price is suggested
    pub reasoning: String,

    /// Expected impact
    pub impact: Impact,

    /// How long the change takes to implement (e.g. "3-5 days")
    pub timeframe: String,

    /// Factors that went into the recommendation
    pub factors: SmallVec<[String; 3]>,
}

impl<'a> PricingRecommendation<'a> {
    /// Difference between the recommended and the given current price.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the currencies differ.
    pub fn adjustment(
        &self,
        current_price: Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, MoneyError> {
        self.recommended_price.sub(current_price)
    }

    /// The adjustment as percent points of the current price, to one decimal place.
    ///
    /// Returns `None` if the current price is zero.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the currencies differ.
    pub fn adjustment_percent(
        &self,
        current_price: Money<'a, Currency>,
    ) -> Result<Option<Decimal>, MoneyError> {
        let adjustment = self.adjustment(current_price)?;
        let current_minor = current_price.to_minor_units();

        if current_minor == 0 {
            return Ok(None);
        }

        let ratio = Decimal::from(adjustment.to_minor_units()) / Decimal::from(current_minor);

        Ok(Some((ratio * Decimal::ONE_HUNDRED).round_dp(1)))
    }
}

/// Recommendations validated against a catalog.
#[derive(Debug, Clone, Default)]
pub struct Recommendations<'a> {
    items: Vec<PricingRecommendation<'a>>,
}

impl<'a> Recommendations<'a> {
    /// Validate recommendations against the catalog they refer to.
    ///
    /// # Errors
    ///
    /// Returns a [`RecommendationError`] if a recommendation refers to an unknown product,
    /// has an out of range confidence or uses a different currency.
    pub fn for_catalog(
        items: impl Into<Vec<PricingRecommendation<'a>>>,
        catalog: &Catalog<'_>,
    ) -> Result<Self, RecommendationError> {
        let items = items.into();
        let currency = catalog.currency();

        for item in &items {
            if catalog.product(item.product).is_none() {
                return Err(RecommendationError::UnknownProduct(item.product));
            }

            if item.confidence > 100 {
                return Err(RecommendationError::InvalidConfidence(
                    item.product,
                    item.confidence,
                ));
            }

            for money in [&item.recommended_price, &item.potential_revenue] {
                if money.currency() != currency {
                    return Err(RecommendationError::CurrencyMismatch(
                        item.product,
                        money.currency().iso_alpha_code,
                        currency.iso_alpha_code,
                    ));
                }
            }
        }

        Ok(Self { items })
    }

    /// Number of recommendations.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if there are no recommendations.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over recommendations in their original order.
    pub fn iter(&self) -> impl Iterator<Item = &PricingRecommendation<'a>> {
        self.items.iter()
    }

    /// Recommendations ordered by confidence, highest first. Ties keep their original order.
    pub fn ranked(&self) -> Vec<&PricingRecommendation<'a>> {
        let mut ranked: Vec<_> = self.items.iter().collect();

        ranked.sort_by(|a, b| b.confidence.cmp(&a.confidence));

        ranked
    }
}
