//! Table rendering with `tabled`
//!
//! The same row types back the CLI output (rounded borders) and the
//! Markdown report (pipe tables).

use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::{format_amount, format_percentage, format_signed};
use crate::analysis::{DowSummary, DriverDelta, Heatmap, MonthSummary, QualitySummary, SpikeCard};
use crate::models::{DayOfWeek, ScoredDay};

/// Border style of a rendered table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStyle {
    Terminal,
    Markdown,
}

/// Apply a style and render to a string
pub fn render(mut table: Table, style: TableStyle) -> String {
    match style {
        TableStyle::Terminal => {
            table.with(Style::rounded());
        }
        TableStyle::Markdown => {
            table.with(Style::markdown());
        }
    }
    table.to_string()
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

impl MetricRow {
    fn new(metric: &'static str, value: String) -> Self {
        Self { metric, value }
    }
}

#[derive(Tabled)]
struct DowRow {
    #[tabled(rename = "Day")]
    dow: DayOfWeek,
    #[tabled(rename = "Avg revenue")]
    avg_revenue: String,
    #[tabled(rename = "Median revenue")]
    median_revenue: String,
    #[tabled(rename = "Avg txns")]
    avg_txns: String,
    #[tabled(rename = "Avg units")]
    avg_units: String,
    #[tabled(rename = "Avg AOV")]
    avg_aov: String,
    #[tabled(rename = "Days")]
    n_days: usize,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Txns")]
    txns: usize,
    #[tabled(rename = "Units")]
    units: String,
    #[tabled(rename = "Avg AOV")]
    aov: String,
    #[tabled(rename = "Days")]
    n_days: usize,
}

#[derive(Tabled)]
struct SpikeRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Day")]
    dow: DayOfWeek,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Expected")]
    expected: String,
    #[tabled(rename = "Residual")]
    residual: String,
    #[tabled(rename = "Txns")]
    txns: usize,
    #[tabled(rename = "Units")]
    units: String,
    #[tabled(rename = "z (residual)")]
    z_residual: String,
    #[tabled(rename = "z (revenue)")]
    z_revenue: String,
}

#[derive(Tabled)]
struct DriverRow {
    #[tabled(rename = "Driver")]
    name: &'static str,
    #[tabled(rename = "Actual")]
    actual: String,
    #[tabled(rename = "Mean")]
    mean: String,
    #[tabled(rename = "Delta")]
    delta: String,
}

fn optional_date(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Quality counters as a two-column table
pub fn quality_table(summary: &QualitySummary) -> Table {
    let rows = vec![
        MetricRow::new("Rows", summary.n_rows.to_string()),
        MetricRow::new("Rows with missing values", summary.n_missing_any.to_string()),
        MetricRow::new("Quantity <= 0", summary.n_negative_quantity.to_string()),
        MetricRow::new("Price per unit <= 0", summary.n_negative_price.to_string()),
        MetricRow::new("Total amount <= 0", summary.n_negative_total.to_string()),
        MetricRow::new("First date", optional_date(summary.date_min)),
        MetricRow::new("Last date", optional_date(summary.date_max)),
        MetricRow::new(
            "Total != quantity x price",
            summary.total_amount_mismatches.to_string(),
        ),
    ];
    Table::new(rows)
}

/// Day-of-week profile table
pub fn dow_table(summary: &[DowSummary], symbol: &str) -> Table {
    Table::new(summary.iter().map(|s| DowRow {
        dow: s.dow,
        avg_revenue: format_amount(s.avg_daily_revenue, symbol),
        median_revenue: format_amount(s.median_daily_revenue, symbol),
        avg_txns: format!("{:.2}", s.avg_txns_per_day),
        avg_units: format!("{:.2}", s.avg_units_per_day),
        avg_aov: format_amount(s.avg_aov, symbol),
        n_days: s.n_days,
    }))
}

/// Monthly totals table
pub fn month_table(summary: &[MonthSummary], symbol: &str) -> Table {
    Table::new(summary.iter().map(|s| MonthRow {
        month: s.month.to_string(),
        revenue: format_amount(s.revenue.as_f64(), symbol),
        txns: s.txns,
        units: format!("{:.0}", s.units),
        aov: format_amount(s.aov, symbol),
        n_days: s.n_days,
    }))
}

/// Month x weekday grid of mean revenue; empty cells show `-`
pub fn heatmap_table(heatmap: &Heatmap) -> Table {
    let mut builder = Builder::default();

    let mut header = vec!["Month".to_string()];
    header.extend(DayOfWeek::ALL.iter().map(|d| d.short_name().to_string()));
    builder.push_record(header);

    for (month, means) in heatmap.months.iter().zip(&heatmap.means) {
        let mut record = vec![month.to_string()];
        record.extend(
            means
                .iter()
                .map(|m| m.map(|v| format!("{:.0}", v)).unwrap_or_else(|| "-".to_string())),
        );
        builder.push_record(record);
    }
    builder.build()
}

/// Ranked spike days
pub fn spikes_table(spikes: &[ScoredDay], symbol: &str) -> Table {
    Table::new(spikes.iter().enumerate().map(|(i, d)| SpikeRow {
        rank: i + 1,
        date: d.date.to_string(),
        dow: d.dow,
        revenue: format_amount(d.revenue.as_f64(), symbol),
        expected: format_amount(d.expected_revenue, symbol),
        residual: format_amount(d.residual, symbol),
        txns: d.txns,
        units: format!("{:.0}", d.units),
        z_residual: format!("{:.2}", d.robust_z_residual),
        z_revenue: format!("{:.2}", d.robust_z_revenue),
    }))
}

/// Driver deltas of one spike card
pub fn drivers_table(deltas: &[DriverDelta]) -> Table {
    Table::new(deltas.iter().map(|d| DriverRow {
        name: d.name,
        actual: format!("{:.2}", d.actual),
        mean: format!("{:.2}", d.baseline_mean),
        delta: format_signed(d.delta),
    }))
}

/// Headline of a spike card: revenue against expectation and top category
pub fn card_summary(card: &SpikeCard, symbol: &str) -> Table {
    let pct = card
        .delta_pct
        .map(format_percentage)
        .unwrap_or_else(|| "n/a".to_string());
    let category = match (&card.top_category.name, card.top_category.share) {
        (Some(name), Some(share)) => format!("{} ({})", name, format_percentage(share * 100.0)),
        _ => "-".to_string(),
    };

    let rows = vec![
        MetricRow::new("Date", format!("{} ({})", card.date, card.dow)),
        MetricRow::new("Revenue", format_amount(card.actual_revenue, symbol)),
        MetricRow::new("Expected", format_amount(card.expected_revenue, symbol)),
        MetricRow::new(
            "Delta",
            format!("{} ({})", format_amount(card.delta_revenue, symbol), pct),
        ),
        MetricRow::new("Score", format!("{:.2}", card.score)),
        MetricRow::new("Top category", category),
    ];
    Table::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MonthKey;

    #[test]
    fn test_heatmap_table_markdown() {
        let heatmap = Heatmap {
            months: vec![MonthKey::new(2023, 1)],
            means: vec![[Some(120.4), None, None, None, None, None, Some(80.0)]],
            counts: vec![[1, 0, 0, 0, 0, 0, 1]],
        };

        let text = render(heatmap_table(&heatmap), TableStyle::Markdown);
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].contains("Month"));
        assert!(lines[0].contains("Mon"));
        assert!(lines[0].contains("Sun"));
        assert!(lines[2].contains("2023-01"));
        assert!(lines[2].contains("120"));
        assert!(lines[2].contains("-"));
    }

    #[test]
    fn test_quality_table_lists_mismatches() {
        let summary = QualitySummary {
            n_rows: 3,
            n_missing_any: 0,
            n_negative_quantity: 0,
            n_negative_price: 0,
            n_negative_total: 0,
            date_min: None,
            date_max: None,
            total_amount_mismatches: 2,
        };

        let text = render(quality_table(&summary), TableStyle::Terminal);
        assert!(text.contains("Total != quantity x price"));
        assert!(text.contains("First date"));
    }
}
