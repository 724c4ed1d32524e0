//! Products

use std::fmt;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

use crate::movement::PriceMovement;

/// Product identifier, unique within a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Sales trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Sales are rising
    Up,

    /// Sales are falling
    Down,

    /// No significant movement
    #[default]
    Stable,
}

impl Trend {
    /// Lowercase label, as shown next to the trend marker.
    pub fn label(self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
        }
    }
}

/// Listing status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Listed and selling
    #[default]
    Active,

    /// Delisted
    Inactive,
}

/// Product
///
/// Derived figures (`price_change`, `competitor_diff` and `revenue`) are stored as
/// recorded and are never recalculated from the prices or units sold.
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Brand name
    pub brand: String,

    /// Category name (e.g. "Footwear")
    pub category: String,

    /// Current selling price
    pub current_price: Money<'a, Currency>,

    /// Price before the most recent change
    pub original_price: Money<'a, Currency>,

    /// Recorded price change, in percent points
    pub price_change: Decimal,

    /// Cheapest competitor price
    pub competitor_price: Money<'a, Currency>,

    /// Recorded difference to the competitor price, in percent points
    pub competitor_diff: Decimal,

    /// Units sold in the reporting period
    pub units_sold: u64,

    /// Recorded revenue for the reporting period
    pub revenue: Money<'a, Currency>,

    /// Sales trend
    pub trend: Trend,

    /// Listing status
    pub status: Status,

    /// Free-form "last updated" label (e.g. "2 hours ago")
    pub last_updated: String,
}

impl<'a> Product<'a> {
    /// Creates a freshly listed product: no price history, no competitor gap, no sales.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        brand: impl Into<String>,
        category: impl Into<String>,
        price: Money<'a, Currency>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            brand: brand.into(),
            category: category.into(),
            current_price: price,
            original_price: price,
            price_change: Decimal::ZERO,
            competitor_price: price,
            competitor_diff: Decimal::ZERO,
            units_sold: 0,
            revenue: Money::from_minor(0, price.currency()),
            trend: Trend::Stable,
            status: Status::Active,
            last_updated: String::new(),
        }
    }

    /// Returns true if the current price differs from the original price.
    pub fn is_repriced(&self) -> bool {
        self.original_price != self.current_price
    }

    /// Direction of the recorded price change.
    pub fn price_movement(&self) -> PriceMovement {
        PriceMovement::from_percent(self.price_change)
    }

    /// Direction of the recorded competitor difference.
    pub fn competitor_movement(&self) -> PriceMovement {
        PriceMovement::from_percent(self.competitor_diff)
    }

    /// Money fields of the product, in declaration order.
    pub(crate) fn money_fields(&self) -> [&Money<'a, Currency>; 4] {
        [
            &self.current_price,
            &self.original_price,
            &self.competitor_price,
            &self.revenue,
        ]
    }
}
