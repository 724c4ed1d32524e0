//! Vitrine prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, CatalogError},
    filter::{CategorySelector, ProductFilter, filter_products},
    fixtures::{Fixture, FixtureError},
    insights::{Insight, InsightError, InsightKind, Insights},
    movement::{PriceMovement, Tone, format_percent_points},
    products::{Product, ProductId, Status, Trend},
    recommendations::{Impact, PricingRecommendation, RecommendationError, Recommendations},
    report::{Report, ReportError},
    session::{Session, Theme},
    summary::{CatalogSummary, SummaryError, average_price, total_revenue},
};
