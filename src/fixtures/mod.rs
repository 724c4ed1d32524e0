//! Fixtures

use std::{fs, path::PathBuf};

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{Catalog, CatalogError},
    fixtures::{
        insights::InsightsFixture, products::ProductsFixture,
        recommendations::RecommendationsFixture,
    },
    insights::{Insight, InsightError, Insights},
    products::Product,
    recommendations::{PricingRecommendation, RecommendationError, Recommendations},
};

pub mod insights;
pub mod products;
pub mod recommendations;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// Catalog validation error
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// Recommendation validation error
    #[error("Invalid recommendations: {0}")]
    Recommendation(#[from] RecommendationError),

    /// Insight validation error
    #[error("Invalid insights: {0}")]
    Insight(#[from] InsightError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Products in file order
    products: Vec<Product<'a>>,

    /// Unvalidated recommendations
    recommendations: Vec<PricingRecommendation<'a>>,

    /// Market insights
    insights: Insights,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: Vec::new(),
            recommendations: Vec::new(),
            insights: Insights::default(),
            currency: None,
        }
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are currency mismatches.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;
        let count = fixture.products.len();

        for product_fixture in fixture.products {
            let (_minor_units, currency) = products::parse_price(&product_fixture.current_price)?;
            self.check_currency(currency)?;

            let product: Product<'a> = product_fixture.try_into()?;
            self.products.push(product);
        }

        debug!(path = %file_path.display(), products = count, "loaded product fixture");

        Ok(self)
    }

    /// Load recommendations from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if no products have been loaded
    /// or if the recommendations use another currency than the products.
    pub fn load_recommendations(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self
            .base_path
            .join("recommendations")
            .join(format!("{name}.yml"));

        let contents = fs::read_to_string(&file_path)?;
        let fixture: RecommendationsFixture = serde_norway::from_str(&contents)?;
        let count = fixture.recommendations.len();

        if self.currency.is_none() {
            return Err(FixtureError::NoCurrency);
        }

        for recommendation_fixture in fixture.recommendations {
            let (_minor_units, currency) =
                products::parse_price(&recommendation_fixture.recommended_price)?;
            self.check_currency(currency)?;

            let recommendation: PricingRecommendation<'a> = recommendation_fixture.try_into()?;
            self.recommendations.push(recommendation);
        }

        debug!(
            path = %file_path.display(),
            recommendations = count,
            "loaded recommendation fixture"
        );

        Ok(self)
    }

    /// Load market insights from a YAML fixture file
    ///
    /// Insights are catalog-wide, so they can be loaded before or without products.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an insight has a
    /// confidence above 100%.
    pub fn load_insights(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("insights").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: InsightsFixture = serde_norway::from_str(&contents)?;

        let insights: Vec<Insight> = self
            .insights
            .iter()
            .cloned()
            .chain(fixture.insights.into_iter().map(Insight::from))
            .collect();

        self.insights = Insights::new(insights)?;

        debug!(
            path = %file_path.display(),
            insights = self.insights.len(),
            "loaded insight fixture"
        );

        Ok(self)
    }

    /// Load a fixture set: products, plus recommendations and insights when the set has any.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in("./fixtures", name)
    }

    /// Load a fixture set from the given base path.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set_in(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture.load_products(name)?;

        let recommendations_path = fixture
            .base_path
            .join("recommendations")
            .join(format!("{name}.yml"));

        if recommendations_path.exists() {
            fixture.load_recommendations(name)?;
        }

        if fixture
            .base_path
            .join("insights")
            .join(format!("{name}.yml"))
            .exists()
        {
            fixture.load_insights(name)?;
        }

        Ok(fixture)
    }

    /// Build a catalog from the loaded products.
    ///
    /// # Errors
    ///
    /// Returns an error if no products were loaded or the products fail catalog validation.
    pub fn catalog(&self) -> Result<Catalog<'a>, FixtureError> {
        let currency = self.currency()?;

        Ok(Catalog::with_products(self.products.clone(), currency)?)
    }

    /// Validate the loaded recommendations against a catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if a recommendation fails validation.
    pub fn recommendations(
        &self,
        catalog: &Catalog<'_>,
    ) -> Result<Recommendations<'a>, FixtureError> {
        Ok(Recommendations::for_catalog(
            self.recommendations.clone(),
            catalog,
        )?)
    }

    /// Get the loaded market insights
    pub fn insights(&self) -> &Insights {
        &self.insights
    }

    /// Get the loaded products
    pub fn products(&self) -> &[Product<'a>] {
        &self.products
    }

    /// Get the fixture currency
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    fn check_currency(&mut self, currency: &'static Currency) -> Result<(), FixtureError> {
        match self.currency {
            Some(existing) if existing != currency => Err(FixtureError::CurrencyMismatch(
                existing.iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            )),
            Some(_) => Ok(()),
            None => {
                self.currency = Some(currency);
                Ok(())
            }
        }
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::fs::{create_dir_all, write};

    use rusty_money::{Money, iso::USD};
    use tempfile::TempDir;
    use testresult::TestResult;

    use crate::products::{ProductId, Trend};

    use super::*;

    const PRODUCTS: &str = r#"
products:
  - id: 1
    name: Premium Denim Jacket
    brand: Urban Style
    category: Outerwear
    current_price: "179 USD"
    original_price: "189 USD"
    price_change: "-5.3%"
    competitor_price: "185 USD"
    competitor_diff: "-3.2%"
    units_sold: 234
    revenue: "41886 USD"
    trend: down
    last_updated: 2 hours ago
  - id: 2
    name: Designer Sneakers
    brand: SportLux
    category: Footwear
    current_price: "279 USD"
    original_price: "299 USD"
    price_change: "-6.7"
    competitor_price: "295 USD"
    competitor_diff: "-5.4"
    units_sold: 156
    revenue: "43524 USD"
    trend: up
    last_updated: 4 hours ago
"#;

    const RECOMMENDATIONS: &str = r#"
recommendations:
  - product: 2
    recommended_price: "265 USD"
    confidence: 87
    potential_revenue: "8900 USD"
    reasoning: Competitor undercut detected.
    impact: medium
    timeframe: 1-2 days
    factors: [Competitor Pricing, Volume Optimization]
"#;

    const INSIGHTS: &str = r"
insights:
  - title: Seasonal Trend Alert
    description: Winter apparel demand increasing 23% ahead of forecast
    type: opportunity
    confidence: 89
    action: Consider increasing winter collection prices by 8-12%
  - title: Inventory Optimization
    description: Slow-moving items detected in accessories category
    type: warning
    confidence: 78
    action: Apply 10-15% discount to clear inventory within 2 weeks
";

    fn write_insights(dir: &TempDir, insights: &str) -> TestResult {
        create_dir_all(dir.path().join("insights"))?;
        write(dir.path().join("insights").join("test.yml"), insights)?;

        Ok(())
    }

    fn fixture_dir(products: &str, recommendations: Option<&str>) -> TestResult<TempDir> {
        let dir = TempDir::new()?;

        create_dir_all(dir.path().join("products"))?;
        write(dir.path().join("products").join("test.yml"), products)?;

        if let Some(recommendations) = recommendations {
            create_dir_all(dir.path().join("recommendations"))?;
            write(
                dir.path().join("recommendations").join("test.yml"),
                recommendations,
            )?;
        }

        Ok(dir)
    }

    #[test]
    fn load_products_keeps_file_order() -> TestResult {
        let dir = fixture_dir(PRODUCTS, None)?;

        let fixture = Fixture::from_set_in(dir.path(), "test")?;
        let catalog = fixture.catalog()?;

        let names: Vec<&str> = catalog.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, ["Premium Denim Jacket", "Designer Sneakers"]);
        assert_eq!(catalog.currency(), USD);

        Ok(())
    }

    #[test]
    fn load_products_parses_fields() -> TestResult {
        let dir = fixture_dir(PRODUCTS, None)?;

        let fixture = Fixture::from_set_in(dir.path(), "test")?;
        let catalog = fixture.catalog()?;
        let jacket = catalog.product(ProductId(1)).ok_or("missing jacket")?;

        assert_eq!(jacket.current_price, Money::from_minor(17_900, USD));
        assert_eq!(jacket.original_price, Money::from_minor(18_900, USD));
        assert_eq!(jacket.price_change, rust_decimal::Decimal::new(-53, 1));
        assert_eq!(jacket.revenue, Money::from_minor(4_188_600, USD));
        assert_eq!(jacket.units_sold, 234);
        assert_eq!(jacket.trend, Trend::Down);
        assert_eq!(jacket.last_updated, "2 hours ago");

        Ok(())
    }

    #[test]
    fn from_set_loads_recommendations_when_present() -> TestResult {
        let dir = fixture_dir(PRODUCTS, Some(RECOMMENDATIONS))?;

        let fixture = Fixture::from_set_in(dir.path(), "test")?;
        let catalog = fixture.catalog()?;
        let recommendations = fixture.recommendations(&catalog)?;

        assert_eq!(recommendations.len(), 1);

        Ok(())
    }

    #[test]
    fn from_set_without_recommendations_is_empty() -> TestResult {
        let dir = fixture_dir(PRODUCTS, None)?;

        let fixture = Fixture::from_set_in(dir.path(), "test")?;
        let catalog = fixture.catalog()?;

        assert!(fixture.recommendations(&catalog)?.is_empty());

        Ok(())
    }

    #[test]
    fn mixed_currencies_are_rejected() -> TestResult {
        let products = PRODUCTS.replacen("\"279 USD\"", "\"279 GBP\"", 1);
        let dir = fixture_dir(&products, None)?;

        let result = Fixture::from_set_in(dir.path(), "test");

        assert!(matches!(
            result,
            Err(FixtureError::CurrencyMismatch(expected, found)) if expected == "USD" && found == "GBP"
        ));

        Ok(())
    }

    #[test]
    fn duplicate_ids_fail_catalog_validation() -> TestResult {
        let products = PRODUCTS.replacen("id: 2", "id: 1", 1);
        let dir = fixture_dir(&products, None)?;

        let fixture = Fixture::from_set_in(dir.path(), "test")?;

        assert!(matches!(
            fixture.catalog(),
            Err(FixtureError::Catalog(CatalogError::DuplicateId(ProductId(1))))
        ));

        Ok(())
    }

    #[test]
    fn recommendations_for_unknown_products_are_rejected() -> TestResult {
        let recommendations = RECOMMENDATIONS.replacen("product: 2", "product: 42", 1);
        let dir = fixture_dir(PRODUCTS, Some(&recommendations))?;

        let fixture = Fixture::from_set_in(dir.path(), "test")?;
        let catalog = fixture.catalog()?;

        assert!(matches!(
            fixture.recommendations(&catalog),
            Err(FixtureError::Recommendation(
                RecommendationError::UnknownProduct(ProductId(42))
            ))
        ));

        Ok(())
    }

    #[test]
    fn recommendations_require_products() -> TestResult {
        let dir = fixture_dir(PRODUCTS, Some(RECOMMENDATIONS))?;

        let mut fixture = Fixture::with_base_path(dir.path());
        let result = fixture.load_recommendations("test");

        assert!(matches!(result, Err(FixtureError::NoCurrency)));

        Ok(())
    }

    #[test]
    fn from_set_loads_insights_when_present() -> TestResult {
        let dir = fixture_dir(PRODUCTS, None)?;
        write_insights(&dir, INSIGHTS)?;

        let fixture = Fixture::from_set_in(dir.path(), "test")?;
        let titles: Vec<&str> = fixture
            .insights()
            .iter()
            .map(|insight| insight.title.as_str())
            .collect();

        assert_eq!(titles, ["Seasonal Trend Alert", "Inventory Optimization"]);

        Ok(())
    }

    #[test]
    fn from_set_without_insights_is_empty() -> TestResult {
        let dir = fixture_dir(PRODUCTS, None)?;

        let fixture = Fixture::from_set_in(dir.path(), "test")?;

        assert!(fixture.insights().is_empty(), "no insights file was written");

        Ok(())
    }

    #[test]
    fn insights_load_without_products() -> TestResult {
        let dir = TempDir::new()?;
        write_insights(&dir, INSIGHTS)?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_insights("test")?;

        assert_eq!(fixture.insights().len(), 2);

        Ok(())
    }

    #[test]
    fn insight_confidence_above_one_hundred_is_rejected() -> TestResult {
        let dir = fixture_dir(PRODUCTS, None)?;
        write_insights(&dir, &INSIGHTS.replacen("confidence: 78", "confidence: 120", 1))?;

        let error = Fixture::from_set_in(dir.path(), "test").err();

        assert!(
            matches!(
                &error,
                Some(FixtureError::Insight(InsightError::InvalidConfidence {
                    title,
                    confidence: 120,
                })) if title == "Inventory Optimization"
            ),
            "expected an invalid confidence error, got {error:?}"
        );

        Ok(())
    }

    #[test]
    fn missing_set_is_an_io_error() {
        let result = Fixture::from_set_in("/nonexistent", "test");

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }

    #[test]
    fn catalog_without_products_has_no_currency() {
        let fixture = Fixture::new();

        assert!(matches!(fixture.catalog(), Err(FixtureError::NoCurrency)));
    }
}
