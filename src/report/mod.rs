//! Report

use std::{fmt::Write as _, io};

use rusty_money::MoneyError;
use smallvec::{SmallVec, smallvec};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme as TableTheme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    catalog::Catalog,
    filter::ProductFilter,
    insights::Insights,
    movement::{Tone, format_percent_points},
    products::{Product, ProductId, Trend},
    recommendations::{PricingRecommendation, Recommendations},
    session::{Session, Theme},
    summary::{CatalogSummary, SummaryError},
};

/// Errors that can occur when rendering a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Reports are only rendered for signed-in sessions.
    #[error("Sign in to view the dashboard")]
    Unauthenticated,

    /// Error computing the summary figures.
    #[error(transparent)]
    Summary(#[from] SummaryError),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// A recommendation refers to a product missing from the catalog.
    #[error("Missing product {0}")]
    MissingProduct(ProductId),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Product analytics view: headline figures for the whole catalog plus the filtered table.
#[derive(Debug)]
pub struct Report<'c, 'a> {
    catalog: &'c Catalog<'a>,
    summary: CatalogSummary<'a>,
    visible: Vec<&'c Product<'a>>,
    recommendations: Option<&'c Recommendations<'a>>,
    insights: Option<&'c Insights>,
}

impl<'c, 'a> Report<'c, 'a> {
    /// Build a report for the catalog under the given filter.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError`] if the summary figures cannot be calculated.
    pub fn new(
        catalog: &'c Catalog<'a>,
        filter: &ProductFilter,
        price_alerts: u32,
    ) -> Result<Self, ReportError> {
        Ok(Self {
            catalog,
            summary: catalog.summary(price_alerts)?,
            visible: catalog.filter(filter),
            recommendations: None,
            insights: None,
        })
    }

    /// Include a recommendations table.
    #[must_use]
    pub fn with_recommendations(mut self, recommendations: &'c Recommendations<'a>) -> Self {
        self.recommendations = Some(recommendations);
        self
    }

    /// Include a market insights table.
    #[must_use]
    pub fn with_insights(mut self, insights: &'c Insights) -> Self {
        self.insights = Some(insights);
        self
    }

    /// Headline figures.
    pub fn summary(&self) -> &CatalogSummary<'a> {
        &self.summary
    }

    /// Products visible under the report's filter.
    pub fn visible(&self) -> &[&'c Product<'a>] {
        &self.visible
    }

    /// Writes the report.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is signed out, a recommendation cannot be priced or
    /// the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write, session: &Session) -> Result<(), ReportError> {
        if !session.is_authenticated() {
            return Err(ReportError::Unauthenticated);
        }

        let theme = session.theme();

        write_summary_cards(&mut out, &self.summary, theme)?;

        if self.visible.is_empty() {
            writeln!(out, "\nNo products match the current filters.")?;
        } else {
            write_product_table(&mut out, &self.visible, theme)?;
        }

        if let Some(recommendations) = self.recommendations {
            write_recommendations_table(&mut out, self.catalog, recommendations, theme)?;
        }

        if let Some(insights) = self.insights {
            write_insights_table(&mut out, insights, theme)?;
        }

        Ok(())
    }
}

fn write_summary_cards(
    out: &mut impl io::Write,
    summary: &CatalogSummary<'_>,
    theme: Theme,
) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record([
        "Total Products",
        "Avg. Price",
        "Price Alerts",
        "Total Revenue",
    ]);

    builder.push_record([
        summary.total_products.to_string(),
        summary
            .average_price
            .map_or_else(|| "n/a".to_string(), |average| format!("{average}")),
        summary.price_alerts.to_string(),
        format!("{}", summary.total_revenue),
    ]);

    builder.push_record([
        "Active in catalog",
        "Across all products",
        "Competitor price changes",
        "This month",
    ]);

    let mut table = builder.build();

    table.with(table_theme(theme, &[]));
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Rows::new(2..3), tone_color(Tone::Muted, theme));

    write_table(out, &table.to_string(), theme)
}

fn write_product_table(
    out: &mut impl io::Write,
    products: &[&Product<'_>],
    theme: Theme,
) -> io::Result<()> {
    let mut builder = Builder::default();
    let mut color_ops: SmallVec<[(usize, usize, Tone); 32]> = smallvec![];

    builder.push_record([
        "Product",
        "Current Price",
        "Price Change",
        "Competitor Price",
        "Sales",
        "Revenue",
        "Trend",
    ]);

    // header is row 0
    for (row, product) in products.iter().enumerate().map(|(idx, p)| (idx + 1, p)) {
        builder.push_record(product_cells(product));

        color_ops.push((row, 2, Tone::from(product.price_movement())));
        color_ops.push((row, 3, Tone::from(product.competitor_movement())));
        color_ops.push((row, 6, Tone::from(product.trend)));
    }

    let boundaries: SmallVec<[usize; 16]> = (2..=products.len()).collect();

    let mut table = builder.build();

    table.with(table_theme(theme, &boundaries));
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..6), Alignment::right());

    for (row, col, tone) in color_ops {
        table.modify((row, col), tone_color(tone, theme));
    }

    write_table(out, &table.to_string(), theme)
}

fn product_cells(product: &Product<'_>) -> [String; 7] {
    let current_price = if product.is_repriced() {
        format!("{}\nwas {}", product.current_price, product.original_price)
    } else {
        format!("{}", product.current_price)
    };

    [
        format!(
            "{}\n{} • {}",
            product.name, product.brand, product.category
        ),
        current_price,
        format_percent_points(product.price_change),
        format!(
            "{}\n{}",
            product.competitor_price,
            format_percent_points(product.competitor_diff)
        ),
        group_thousands(product.units_sold),
        format!("{}", product.revenue),
        format!("{} {}", trend_marker(product.trend), product.trend.label()),
    ]
}

fn write_recommendations_table(
    out: &mut impl io::Write,
    catalog: &Catalog<'_>,
    recommendations: &Recommendations<'_>,
    theme: Theme,
) -> Result<(), ReportError> {
    if recommendations.is_empty() {
        return Ok(());
    }

    let mut builder = Builder::default();
    let mut color_ops: SmallVec<[(usize, usize, Tone); 16]> = smallvec![];

    builder.push_record([
        "Product",
        "Current",
        "Recommended",
        "Change",
        "Confidence",
        "Impact",
        "Potential Revenue",
        "Timeframe",
    ]);

    for (row, rec) in recommendations
        .ranked()
        .into_iter()
        .enumerate()
        .map(|(idx, rec)| (idx + 1, rec))
    {
        let product = catalog
            .product(rec.product)
            .ok_or(ReportError::MissingProduct(rec.product))?;

        builder.push_record(recommendation_cells(rec, product)?);

        color_ops.push((row, 2, Tone::Accent));
        color_ops.push((row, 5, Tone::from(rec.impact)));
    }

    let mut table = builder.build();

    table.with(table_theme(theme, &[]));
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..5), Alignment::right());

    for (row, col, tone) in color_ops {
        table.modify((row, col), tone_color(tone, theme));
    }

    writeln!(out, "\nPricing Recommendations")?;
    write_table(out, &table.to_string(), theme)?;

    Ok(())
}

fn recommendation_cells(
    rec: &PricingRecommendation<'_>,
    product: &Product<'_>,
) -> Result<[String; 8], ReportError> {
    let change = rec
        .adjustment_percent(product.current_price)?
        .map_or_else(String::new, format_percent_points);

    Ok([
        product.name.clone(),
        format!("{}", product.current_price),
        format!("{}", rec.recommended_price),
        change,
        format!("{}%", rec.confidence),
        rec.impact.label().to_string(),
        format!("+{}", rec.potential_revenue),
        rec.timeframe.clone(),
    ])
}

fn write_insights_table(
    out: &mut impl io::Write,
    insights: &Insights,
    theme: Theme,
) -> io::Result<()> {
    if insights.is_empty() {
        return Ok(());
    }

    let mut builder = Builder::default();
    let mut color_ops: SmallVec<[(usize, usize, Tone); 8]> = smallvec![];

    builder.push_record(["Insight", "Type", "Confidence", "Action"]);

    for (row, insight) in insights.iter().enumerate().map(|(idx, i)| (idx + 1, i)) {
        builder.push_record([
            format!("{}\n{}", insight.title, insight.description),
            insight.kind.label().to_string(),
            format!("{}%", insight.confidence),
            insight.action.clone(),
        ]);

        color_ops.push((row, 1, Tone::from(insight.kind)));
    }

    let boundaries: SmallVec<[usize; 8]> = (2..=insights.len()).collect();

    let mut table = builder.build();

    table.with(table_theme(theme, &boundaries));
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..3), Alignment::right());

    for (row, col, tone) in color_ops {
        table.modify((row, col), tone_color(tone, theme));
    }

    writeln!(out, "\nMarket Insights")?;
    write_table(out, &table.to_string(), theme)
}

fn table_theme(theme: Theme, row_boundaries: &[usize]) -> TableTheme {
    let mut table_theme = match theme {
        Theme::Dark => TableTheme::from(Style::modern_rounded()),
        Theme::Light => TableTheme::from(Style::sharp()),
    };

    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    table_theme.remove_horizontal_lines();
    table_theme.insert_horizontal_line(1, separator);

    for &row in row_boundaries {
        table_theme.insert_horizontal_line(row, separator);
    }

    table_theme
}

fn write_table(out: &mut impl io::Write, table: &str, theme: Theme) -> io::Result<()> {
    match theme {
        Theme::Dark => writeln!(out, "\n{}", colorize_borders(table)),
        Theme::Light => writeln!(out, "\n{table}"),
    }
}

/// Terminal colour for a tone under the given theme.
fn tone_color(tone: Tone, theme: Theme) -> Color {
    match (tone, theme) {
        (Tone::Positive, Theme::Dark) => Color::FG_GREEN,
        (Tone::Positive, Theme::Light) => Color::new("\x1b[32m", "\x1b[0m"),
        (Tone::Negative, _) => Color::new("\x1b[31m", "\x1b[0m"),
        (Tone::Accent, Theme::Dark) => Color::new("\x1b[96m", "\x1b[0m"),
        (Tone::Accent, Theme::Light) => Color::new("\x1b[34m", "\x1b[0m"),
        (Tone::Muted, _) => Color::new("\x1b[90m", "\x1b[0m"),
    }
}

fn trend_marker(trend: Trend) -> char {
    match trend {
        Trend::Up => '▲',
        Trend::Down => '▼',
        Trend::Stable => '●',
    }
}

/// Formats an integer with comma thousands separators.
///
/// Units sold are plain counts with no currency, so they cannot go through the `Money`
/// display that formats every price and revenue figure.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Wraps runs of UTF-8 box-drawing characters in ANSI dark-grey escape codes.
///
/// Box-drawing characters occupy U+2500..U+257F; cell content is left untouched.
fn colorize_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut in_run = false;

    for ch in table.chars() {
        let box_char = ('\u{2500}'..='\u{257F}').contains(&ch);

        if box_char && !in_run {
            _ = out.write_str("\x1b[90m");
            in_run = true;
        } else if !box_char && in_run {
            _ = out.write_str("\x1b[0m");
            in_run = false;
        }

        out.push(ch);
    }

    if in_run {
        _ = out.write_str("\x1b[0m");
    }

    out
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::{Money, iso::USD};
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::{
        insights::{Insight, InsightKind},
        recommendations::Impact,
    };

    use super::*;

    fn test_catalog<'a>() -> Result<Catalog<'a>, crate::catalog::CatalogError> {
        Catalog::with_products(
            [
                Product {
                    original_price: Money::from_minor(18_900, USD),
                    price_change: Decimal::new(-53, 1),
                    competitor_price: Money::from_minor(18_500, USD),
                    competitor_diff: Decimal::new(-32, 1),
                    units_sold: 234,
                    revenue: Money::from_minor(4_188_600, USD),
                    trend: Trend::Down,
                    ..Product::new(
                        ProductId(1),
                        "Premium Denim Jacket",
                        "Urban Style",
                        "Outerwear",
                        Money::from_minor(17_900, USD),
                    )
                },
                Product {
                    units_sold: 1_247,
                    revenue: Money::from_minor(3_616_300, USD),
                    trend: Trend::Up,
                    ..Product::new(
                        ProductId(4),
                        "Classic White Tee",
                        "Basic Essentials",
                        "Tops",
                        Money::from_minor(2_900, USD),
                    )
                },
            ],
            USD,
        )
    }

    #[test]
    fn write_to_requires_signed_in_session() -> TestResult {
        let catalog = test_catalog()?;
        let report = Report::new(&catalog, &ProductFilter::default(), 3)?;

        let result = report.write_to(Vec::new(), &Session::signed_out());

        assert!(matches!(result, Err(ReportError::Unauthenticated)));

        Ok(())
    }

    #[test]
    fn write_to_renders_summary_and_products() -> TestResult {
        let catalog = test_catalog()?;
        let report = Report::new(&catalog, &ProductFilter::default(), 3)?;

        let mut out = Vec::new();
        report.write_to(&mut out, &Session::signed_in(Theme::Dark))?;

        let output = String::from_utf8(out)?;
        assert!(output.contains("Total Products"));
        assert!(output.contains("Premium Denim Jacket"));
        assert!(output.contains("Urban Style • Outerwear"));
        assert!(output.contains("-5.3%"));
        assert!(output.contains("1,247"));
        assert!(output.contains("▼ down"));
        assert!(output.contains("78,049"));

        Ok(())
    }

    #[test]
    fn summary_covers_catalog_while_table_is_filtered() -> TestResult {
        let catalog = test_catalog()?;
        let report = Report::new(&catalog, &ProductFilter::new("tee", "all"), 0)?;

        assert_eq!(report.summary().total_products, 2);
        assert_eq!(report.visible().len(), 1);

        let mut out = Vec::new();
        report.write_to(&mut out, &Session::signed_in(Theme::Light))?;

        let output = String::from_utf8(out)?;
        assert!(output.contains("Classic White Tee"));
        assert!(!output.contains("Premium Denim Jacket"));

        Ok(())
    }

    #[test]
    fn write_to_reports_empty_filter_result() -> TestResult {
        let catalog = test_catalog()?;
        let report = Report::new(&catalog, &ProductFilter::new("", "jewelry"), 0)?;

        let mut out = Vec::new();
        report.write_to(&mut out, &Session::signed_in(Theme::Light))?;

        let output = String::from_utf8(out)?;
        assert!(output.contains("No products match the current filters."));

        Ok(())
    }

    #[test]
    fn write_to_renders_recommendations_by_confidence() -> TestResult {
        let catalog = test_catalog()?;
        let recommendations = Recommendations::for_catalog(
            [
                PricingRecommendation {
                    product: ProductId(4),
                    recommended_price: Money::from_minor(3_100, USD),
                    confidence: 70,
                    potential_revenue: Money::from_minor(250_000, USD),
                    reasoning: "Room below competitors".to_string(),
                    impact: Impact::Low,
                    timeframe: "1 week".to_string(),
                    factors: smallvec![],
                },
                PricingRecommendation {
                    product: ProductId(1),
                    recommended_price: Money::from_minor(18_500, USD),
                    confidence: 92,
                    potential_revenue: Money::from_minor(1_240_000, USD),
                    reasoning: "Market demand is high".to_string(),
                    impact: Impact::High,
                    timeframe: "3-5 days".to_string(),
                    factors: smallvec!["Market Demand".to_string()],
                },
            ],
            &catalog,
        )?;

        let report = Report::new(&catalog, &ProductFilter::default(), 3)?
            .with_recommendations(&recommendations);

        let mut out = Vec::new();
        report.write_to(&mut out, &Session::signed_in(Theme::Light))?;

        let output = String::from_utf8(out)?;
        let section = output
            .split("Pricing Recommendations")
            .nth(1)
            .unwrap_or_default();

        let jacket = section.find("Premium Denim Jacket");
        let tee = section.find("Classic White Tee");

        assert!(jacket.is_some() && tee.is_some());
        assert!(jacket < tee, "higher confidence should be listed first");
        assert!(section.contains("+3.4%"));
        assert!(section.contains("92%"));

        Ok(())
    }

    #[test]
    fn write_to_renders_insights_with_kind_colours() -> TestResult {
        let catalog = test_catalog()?;
        let insights = Insights::new([
            Insight {
                title: "Competitor Price War".to_string(),
                description: "Major competitor reduced sneaker prices by 15%".to_string(),
                kind: InsightKind::Threat,
                confidence: 94,
                action: "Implement dynamic pricing for footwear".to_string(),
            },
            Insight {
                title: "Seasonal Trend Alert".to_string(),
                description: "Winter apparel demand increasing 23%".to_string(),
                kind: InsightKind::Opportunity,
                confidence: 89,
                action: "Raise winter collection prices".to_string(),
            },
        ])?;

        let report = Report::new(&catalog, &ProductFilter::default(), 3)?.with_insights(&insights);

        let mut out = Vec::new();
        report.write_to(&mut out, &Session::signed_in(Theme::Light))?;

        let output = String::from_utf8(out)?;
        let section = output.split("Market Insights").nth(1).unwrap_or_default();

        assert!(
            section.contains("\x1b[31mthreat"),
            "threats should be red: {section}"
        );
        assert!(
            section.contains("\x1b[32mopportunity"),
            "opportunities should be green: {section}"
        );
        assert!(section.contains("94%"), "confidence column missing");
        assert!(
            section.find("Competitor Price War") < section.find("Seasonal Trend Alert"),
            "insights keep their original order"
        );

        Ok(())
    }

    #[test]
    fn empty_insights_are_not_rendered() -> TestResult {
        let catalog = test_catalog()?;
        let insights = Insights::default();

        let report = Report::new(&catalog, &ProductFilter::default(), 3)?.with_insights(&insights);

        let mut out = Vec::new();
        report.write_to(&mut out, &Session::signed_in(Theme::Light))?;

        assert!(
            !String::from_utf8(out)?.contains("Market Insights"),
            "empty insights should not print a heading"
        );

        Ok(())
    }

    #[test]
    fn dark_theme_colours_borders() {
        let coloured = colorize_borders("╭─╮\n│a│");

        assert!(coloured.starts_with("\x1b[90m╭─╮"));
        assert!(coloured.contains("\x1b[0ma\x1b[90m"));
    }

    #[test]
    fn group_thousands_inserts_commas() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(892), "892");
        assert_eq!(group_thousands(1_247), "1,247");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }
}
