//! Catalog filtering
//!
//! A product is visible when the free-text query is a case-insensitive substring of its
//! name or brand, and its category is selected. The query is compared literally: it is
//! not trimmed, so a whitespace-only query only matches names or brands containing that
//! exact whitespace.

use crate::products::Product;

/// Category selection for a filtered view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategorySelector {
    /// Every category
    #[default]
    All,

    /// A single category, matched ignoring case
    Only(String),
}

impl CategorySelector {
    /// Returns true if the given category is selected.
    ///
    /// Categories are compared case-insensitively and exactly, never as substrings.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategorySelector::All => true,
            CategorySelector::Only(selected) => {
                category.to_lowercase() == selected.to_lowercase()
            }
        }
    }
}

impl From<&str> for CategorySelector {
    /// `"all"` in any case selects every category; anything else selects one category.
    fn from(value: &str) -> Self {
        let lowered = value.to_lowercase();

        if lowered == "all" {
            CategorySelector::All
        } else {
            CategorySelector::Only(lowered)
        }
    }
}

/// Search query and category selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductFilter {
    query: String,
    category: CategorySelector,
}

impl ProductFilter {
    /// Create a new filter.
    pub fn new(query: &str, category: impl Into<CategorySelector>) -> Self {
        Self {
            query: query.to_lowercase(),
            category: category.into(),
        }
    }

    /// The lowercased search query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The category selection.
    pub fn category(&self) -> &CategorySelector {
        &self.category
    }

    /// Returns true if the product passes both the query and the category selection.
    pub fn matches(&self, product: &Product<'_>) -> bool {
        self.matches_query(product) && self.category.matches(&product.category)
    }

    fn matches_query(&self, product: &Product<'_>) -> bool {
        product.name.to_lowercase().contains(&self.query)
            || product.brand.to_lowercase().contains(&self.query)
    }
}

/// Returns the products matching the filter, in their original order.
pub fn filter_products<'p, 'a>(
    products: &'p [Product<'a>],
    filter: &ProductFilter,
) -> Vec<&'p Product<'a>> {
    products
        .iter()
        .filter(|product| filter.matches(product))
        .collect()
}
