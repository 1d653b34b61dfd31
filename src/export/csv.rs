//! CSV Export functionality
//!
//! Every table is written with a header row through `csv::Writer`, so
//! quoting of category names and labels is handled by the writer.

use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use super::create_output_file;
use crate::error::{PulseError, PulseResult};
use crate::models::{DayOfWeek, Money, MonthKey, ScoredDay, WeekKey};

/// Column layout of `spike_days.csv`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpikeDayRow {
    pub date: NaiveDate,
    pub dow: DayOfWeek,
    pub month: MonthKey,
    pub week: WeekKey,
    pub revenue: Money,
    pub expected_revenue: f64,
    pub residual: f64,
    pub txns: usize,
    pub units: f64,
    pub aov: f64,
    pub robust_z_revenue: f64,
    pub robust_z_residual: f64,
}

impl From<&ScoredDay> for SpikeDayRow {
    fn from(day: &ScoredDay) -> Self {
        Self {
            date: day.date,
            dow: day.dow,
            month: day.month,
            week: day.week,
            revenue: day.revenue,
            expected_revenue: day.expected_revenue,
            residual: day.residual,
            txns: day.txns,
            units: day.units,
            aov: day.aov,
            robust_z_revenue: day.robust_z_revenue,
            robust_z_residual: day.robust_z_residual,
        }
    }
}

/// Write rows to CSV with a header derived from the row type
pub fn export_rows_csv<T: Serialize, W: Write>(rows: &[T], writer: W) -> PulseResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer
        .flush()
        .map_err(|e| PulseError::Export(e.to_string()))
}

/// Write spike days in their exported column order
pub fn export_spike_days_csv<W: Write>(spikes: &[ScoredDay], writer: W) -> PulseResult<()> {
    let rows: Vec<SpikeDayRow> = spikes.iter().map(SpikeDayRow::from).collect();
    export_rows_csv(&rows, writer)
}

/// Write rows to a CSV file, creating parent directories
pub fn export_rows_to_file<T: Serialize>(rows: &[T], path: &Path) -> PulseResult<()> {
    let writer = create_output_file(path)?;
    export_rows_csv(rows, writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BaselineLevel, CalendarFields, CategoryMixRow, DailyMetrics};

    fn scored() -> ScoredDay {
        let date = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let cal = CalendarFields::from_date(date);
        let daily = DailyMetrics {
            date,
            revenue: Money::from_cents(12550),
            txns: 2,
            units: 3.0,
            aov: 62.75,
            dow: cal.dow,
            month: cal.month,
            week: cal.week,
        };
        ScoredDay::from_daily(&daily, 100.0, BaselineLevel::MonthDow)
    }

    #[test]
    fn test_scored_days_header_and_labels() {
        let mut out = Vec::new();
        export_rows_csv(&[scored()], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "date,revenue,txns,units,aov,dow,month,week,expected_revenue,residual,\
             robust_z_revenue,robust_z_residual,baseline_level"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with(
            "2023-01-02,125.5,2,3.0,62.75,Monday,2023-01,2023-01-02/2023-01-08,"
        ));
        assert!(row.ends_with(",month_dow"));
    }

    #[test]
    fn test_spike_days_column_order() {
        let mut out = Vec::new();
        export_spike_days_csv(&[scored()], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with(
            "date,dow,month,week,revenue,expected_revenue,residual,txns,units,aov,\
             robust_z_revenue,robust_z_residual\n"
        ));
    }

    #[test]
    fn test_category_names_are_quoted() {
        let row = CategoryMixRow {
            date: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
            product_category: "Toys, Games".to_string(),
            category_revenue: Money::from_cents(500),
            day_revenue: Money::from_cents(1000),
            category_share: 0.5,
        };
        let mut out = Vec::new();
        export_rows_csv(&[row], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("\"Toys, Games\""));
    }
}
