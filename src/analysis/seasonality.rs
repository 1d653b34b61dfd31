//! Seasonality summaries
//!
//! Day-of-week and month profiles of the daily metrics, plus the
//! month x day-of-week grid of mean daily revenue.

use std::collections::BTreeMap;

use serde::Serialize;

use super::stats::{mean, median};
use crate::models::{DailyMetrics, DayOfWeek, Money, MonthKey};

/// Profile of one day of the week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DowSummary {
    pub dow: DayOfWeek,
    pub avg_daily_revenue: f64,
    pub median_daily_revenue: f64,
    pub avg_txns_per_day: f64,
    pub avg_units_per_day: f64,
    pub avg_aov: f64,
    pub n_days: usize,
}

/// Totals for one month (observed transaction-days only)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    pub month: MonthKey,
    pub revenue: Money,
    pub txns: usize,
    pub units: f64,
    /// Mean of the daily AOVs
    pub aov: f64,
    pub n_days: usize,
}

/// Mean daily revenue per month (rows) and weekday (columns)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Heatmap {
    /// Row labels in ascending order
    pub months: Vec<MonthKey>,
    /// Mean revenue per cell, `None` when no day falls in it
    pub means: Vec<[Option<f64>; 7]>,
    /// Number of days per cell
    pub counts: Vec<[usize; 7]>,
}

impl Heatmap {
    /// Mean revenue of a cell
    pub fn mean(&self, month: MonthKey, dow: DayOfWeek) -> Option<f64> {
        let row = self.months.iter().position(|m| *m == month)?;
        self.means[row][dow.index()]
    }

    /// Largest cell mean, used to scale shading
    pub fn max_mean(&self) -> f64 {
        self.means
            .iter()
            .flatten()
            .flatten()
            .copied()
            .fold(0.0, f64::max)
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

/// Per-weekday profile, Monday first; weekdays with no data are omitted
pub fn dow_summary(daily: &[DailyMetrics]) -> Vec<DowSummary> {
    let mut groups: BTreeMap<DayOfWeek, Vec<&DailyMetrics>> = BTreeMap::new();
    for day in daily {
        groups.entry(day.dow).or_default().push(day);
    }

    groups
        .into_iter()
        .map(|(dow, days)| {
            let revenue: Vec<f64> = days.iter().map(|d| d.revenue.as_f64()).collect();
            let txns: Vec<f64> = days.iter().map(|d| d.txns as f64).collect();
            let units: Vec<f64> = days.iter().map(|d| d.units).collect();
            let aov: Vec<f64> = days.iter().map(|d| d.aov).collect();

            DowSummary {
                dow,
                avg_daily_revenue: mean(&revenue),
                median_daily_revenue: median(&revenue),
                avg_txns_per_day: mean(&txns),
                avg_units_per_day: mean(&units),
                avg_aov: mean(&aov),
                n_days: days.len(),
            }
        })
        .collect()
}

/// Per-month totals in chronological order
pub fn month_summary(daily: &[DailyMetrics]) -> Vec<MonthSummary> {
    let mut groups: BTreeMap<MonthKey, Vec<&DailyMetrics>> = BTreeMap::new();
    for day in daily {
        groups.entry(day.month).or_default().push(day);
    }

    groups
        .into_iter()
        .map(|(month, days)| {
            let aov: Vec<f64> = days.iter().map(|d| d.aov).collect();
            MonthSummary {
                month,
                revenue: days.iter().map(|d| d.revenue).sum(),
                txns: days.iter().map(|d| d.txns).sum(),
                units: days.iter().map(|d| d.units).sum(),
                aov: mean(&aov),
                n_days: days.len(),
            }
        })
        .collect()
}

/// Month x weekday grid of mean daily revenue and day counts
pub fn month_dow_heatmap(daily: &[DailyMetrics]) -> Heatmap {
    let mut cells: BTreeMap<MonthKey, [Vec<f64>; 7]> = BTreeMap::new();
    for day in daily {
        cells.entry(day.month).or_default()[day.dow.index()].push(day.revenue.as_f64());
    }

    let mut heatmap = Heatmap::default();
    for (month, row) in cells {
        heatmap.months.push(month);
        heatmap
            .means
            .push(std::array::from_fn(|i| (!row[i].is_empty()).then(|| mean(&row[i]))));
        heatmap.counts.push(std::array::from_fn(|i| row[i].len()));
    }
    heatmap
}
