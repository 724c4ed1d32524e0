//! Catalog summary figures

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::products::Product;

/// Errors that can occur while computing summary figures.
#[derive(Debug, Error, PartialEq)]
pub enum SummaryError {
    /// The average price of an empty catalog is undefined.
    #[error("average price is undefined for an empty catalog")]
    EmptyCatalog,

    /// The rounded average does not fit in minor units.
    #[error("average price is out of range")]
    OutOfRange,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates the mean current price, rounded to the nearest whole currency unit.
///
/// Midpoints round away from zero, so `$100.50` becomes `$101`.
///
/// # Errors
///
/// - [`SummaryError::EmptyCatalog`]: no products were provided.
/// - [`SummaryError::Money`]: the products are priced in more than one currency.
/// - [`SummaryError::OutOfRange`]: the result cannot be represented in minor units.
pub fn average_price<'a>(products: &[Product<'a>]) -> Result<Money<'a, Currency>, SummaryError> {
    let first = products.first().ok_or(SummaryError::EmptyCatalog)?;
    let currency = first.current_price.currency();

    let total = products
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, product| {
            acc.add(product.current_price)
        })?;

    let minor_per_unit = Decimal::from(10_i64.pow(currency.exponent));
    let count = Decimal::from(products.len());

    let whole_units = (Decimal::from(total.to_minor_units()) / (count * minor_per_unit))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    let minor_units = (whole_units * minor_per_unit)
        .to_i64()
        .ok_or(SummaryError::OutOfRange)?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Sums the recorded revenue of every product.
///
/// Revenue is taken as stored; it is not derived from price and units sold.
///
/// # Errors
///
/// Returns a [`MoneyError`] if a product's revenue is not in `currency`.
pub fn total_revenue<'a>(
    products: &[Product<'a>],
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, MoneyError> {
    products
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, product| {
            acc.add(product.revenue)
        })
}

/// Headline figures for a full catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSummary<'a> {
    /// Number of products
    pub total_products: usize,

    /// Mean current price, `None` when the catalog is empty
    pub average_price: Option<Money<'a, Currency>>,

    /// Competitor price alerts, supplied by the caller
    pub price_alerts: u32,

    /// Sum of recorded revenue
    pub total_revenue: Money<'a, Currency>,
}

impl<'a> CatalogSummary<'a> {
    /// Summarise the given products.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if money arithmetic fails. An empty product list is not an
    /// error: the average price is left undefined.
    pub fn from_products(
        products: &[Product<'a>],
        currency: &'a Currency,
        price_alerts: u32,
    ) -> Result<Self, SummaryError> {
        let average_price = match average_price(products) {
            Ok(average) => Some(average),
            Err(SummaryError::EmptyCatalog) => None,
            Err(err) => return Err(err),
        };

        Ok(Self {
            total_products: products.len(),
            average_price,
            price_alerts,
            total_revenue: total_revenue(products, currency)?,
        })
    }
}
