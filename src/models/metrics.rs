//! Aggregated metric rows
//!
//! Rows produced by the aggregation and scoring stages. Field order matches
//! the column order of the exported CSV files.

use chrono::NaiveDate;
use serde::Serialize;

use super::calendar::{DayOfWeek, MonthKey, WeekKey};
use super::money::Money;

/// Metrics for one transaction-day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyMetrics {
    pub date: NaiveDate,
    /// Sum of line totals
    pub revenue: Money,
    /// Distinct transactions
    pub txns: usize,
    /// Units sold
    pub units: f64,
    /// Average order value (revenue / txns)
    pub aov: f64,
    pub dow: DayOfWeek,
    pub month: MonthKey,
    pub week: WeekKey,
}

/// Metrics for one week ending Sunday
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyMetrics {
    pub week: WeekKey,
    pub revenue: Money,
    pub txns: usize,
    pub units: f64,
    pub aov: f64,
    /// Transaction-days observed in the week
    pub n_days: usize,
}

/// Revenue of one category on one day, with its share of the day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMixRow {
    pub date: NaiveDate,
    pub product_category: String,
    pub category_revenue: Money,
    pub day_revenue: Money,
    pub category_share: f64,
}

/// Which level of the seasonal hierarchy produced an expectation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineLevel {
    /// Mean of the same month and weekday
    MonthDow,
    /// Mean of the same month
    Month,
    /// Mean of the same weekday
    Dow,
    /// Mean of every day
    Overall,
}

impl std::fmt::Display for BaselineLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::MonthDow => "month+dow",
            Self::Month => "month",
            Self::Dow => "dow",
            Self::Overall => "overall",
        };
        f.write_str(label)
    }
}

/// A day with its baseline expectation and spike scores
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredDay {
    pub date: NaiveDate,
    pub revenue: Money,
    pub txns: usize,
    pub units: f64,
    pub aov: f64,
    pub dow: DayOfWeek,
    pub month: MonthKey,
    pub week: WeekKey,
    pub expected_revenue: f64,
    /// Actual minus expected revenue
    pub residual: f64,
    pub robust_z_revenue: f64,
    pub robust_z_residual: f64,
    pub baseline_level: BaselineLevel,
}

impl ScoredDay {
    /// Attach baseline and scores to a daily row
    pub fn from_daily(
        day: &DailyMetrics,
        expected_revenue: f64,
        baseline_level: BaselineLevel,
    ) -> Self {
        Self {
            date: day.date,
            revenue: day.revenue,
            txns: day.txns,
            units: day.units,
            aov: day.aov,
            dow: day.dow,
            month: day.month,
            week: day.week,
            expected_revenue,
            residual: day.revenue.as_f64() - expected_revenue,
            robust_z_revenue: 0.0,
            robust_z_residual: 0.0,
            baseline_level,
        }
    }
}
