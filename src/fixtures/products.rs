//! Product Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    products::{Product, ProductId, Status, Trend},
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Products, in catalog order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Brand name
    pub brand: String,

    /// Category name
    pub category: String,

    /// Current price (e.g., "179 USD")
    pub current_price: String,

    /// Original price (e.g., "189 USD")
    pub original_price: String,

    /// Price change (e.g., "-5.3%")
    pub price_change: String,

    /// Competitor price (e.g., "185 USD")
    pub competitor_price: String,

    /// Competitor difference (e.g., "-3.2%")
    pub competitor_diff: String,

    /// Units sold
    pub units_sold: u64,

    /// Revenue (e.g., "41886 USD")
    pub revenue: String,

    /// Sales trend
    pub trend: Trend,

    /// Listing status
    #[serde(default)]
    pub status: Status,

    /// "Last updated" label
    #[serde(default)]
    pub last_updated: String,
}

impl TryFrom<ProductFixture> for Product<'_> {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        Ok(Product {
            id: fixture.id,
            name: fixture.name,
            brand: fixture.brand,
            category: fixture.category,
            current_price: parse_money(&fixture.current_price)?,
            original_price: parse_money(&fixture.original_price)?,
            price_change: parse_percent_points(&fixture.price_change)?,
            competitor_price: parse_money(&fixture.competitor_price)?,
            competitor_diff: parse_percent_points(&fixture.competitor_diff)?,
            units_sold: fixture.units_sold,
            revenue: parse_money(&fixture.revenue)?,
            trend: fixture.trend,
            status: fixture.status,
            last_updated: fixture.last_updated,
        })
    }
}

/// Parse a price string (e.g., "179 USD") into money.
///
/// # Errors
///
/// Returns an error if the price cannot be parsed.
pub fn parse_money(s: &str) -> Result<Money<'static, Currency>, FixtureError> {
    let (minor_units, currency) = parse_price(s)?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Parse price string (e.g., "2.99 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    let minor_units = amount
        .checked_mul(Decimal::from(10_i64.pow(currency.exponent)))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}

/// Parse a percentage string into percent points.
///
/// Accepts "-5.3%" and "-5.3"; both yield -5.3.
///
/// # Errors
///
/// Returns an error if the string cannot be parsed.
pub fn parse_percent_points(s: &str) -> Result<Decimal, FixtureError> {
    let trimmed = s.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();

    number
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))
}
