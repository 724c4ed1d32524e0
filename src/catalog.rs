//! Catalog

use rustc_hash::FxHashSet;
use rusty_money::iso::Currency;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{
    filter::{ProductFilter, filter_products},
    products::{Product, ProductId},
    summary::{CatalogSummary, SummaryError},
};

/// Errors related to catalog construction.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// Two products share an identifier.
    #[error("Duplicate product id {0}")]
    DuplicateId(ProductId),

    /// A product has a money field in a currency other than the catalog currency.
    #[error("Product {id} has currency {found}, but catalog has currency {expected}")]
    CurrencyMismatch {
        /// Offending product
        id: ProductId,
        /// Currency found on the product
        found: &'static str,
        /// Catalog currency
        expected: &'static str,
    },
}

/// An immutable, ordered collection of products priced in one currency.
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    products: Vec<Product<'a>>,
    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    /// Create a new empty catalog.
    pub fn new(currency: &'static Currency) -> Self {
        Catalog {
            products: Vec::new(),
            currency,
        }
    }

    /// Create a new catalog with the given products, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if an id is repeated or a product is priced in another currency.
    pub fn with_products(
        products: impl Into<Vec<Product<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let products = products.into();
        let mut seen = FxHashSet::default();

        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }

            if let Some(money) = product
                .money_fields()
                .into_iter()
                .find(|money| money.currency() != currency)
            {
                return Err(CatalogError::CurrencyMismatch {
                    id: product.id,
                    found: money.currency().iso_alpha_code,
                    expected: currency.iso_alpha_code,
                });
            }
        }

        debug!(
            products = products.len(),
            currency = currency.iso_alpha_code,
            "catalog built"
        );

        Ok(Catalog { products, currency })
    }

    /// Get the number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Get the currency of the catalog.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// All products, in catalog order.
    pub fn products(&self) -> &[Product<'a>] {
        &self.products
    }

    /// Iterate over the products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product<'a>> {
        self.products.iter()
    }

    /// Look up a product by id.
    pub fn product(&self, id: ProductId) -> Option<&Product<'a>> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Distinct categories in first-seen order, compared case-insensitively.
    pub fn categories(&self) -> SmallVec<[&str; 8]> {
        let mut seen = FxHashSet::default();

        self.products
            .iter()
            .filter(|product| seen.insert(product.category.to_lowercase()))
            .map(|product| product.category.as_str())
            .collect()
    }

    /// Products visible under the given filter, in catalog order.
    pub fn filter(&self, filter: &ProductFilter) -> Vec<&Product<'a>> {
        let visible = filter_products(&self.products, filter);

        debug!(
            query = filter.query(),
            visible = visible.len(),
            total = self.products.len(),
            "catalog filtered"
        );

        visible
    }

    /// Headline figures for the whole catalog, ignoring any filter.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if money arithmetic fails.
    pub fn summary(&self, price_alerts: u32) -> Result<CatalogSummary<'a>, SummaryError> {
        CatalogSummary::from_products(&self.products, self.currency, price_alerts)
    }
}

impl<'c, 'a> IntoIterator for &'c Catalog<'a> {
    type Item = &'c Product<'a>;
    type IntoIter = std::slice::Iter<'c, Product<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
