//! Spike cards
//!
//! A spike card explains one spike day: revenue against its seasonal
//! expectation, the transaction / unit / AOV drivers against their mean
//! over all days, and the category that brought in the most revenue.

use chrono::NaiveDate;
use serde::Serialize;

use super::spikes::{top_spike_days, ScoreBy};
use super::stats::mean;
use crate::error::{PulseError, PulseResult};
use crate::models::{CategoryMixRow, DayOfWeek, ScoredDay};

/// Fixed caveats attached to every card
pub const CARD_NOTES: [&str; 2] = [
    "Baseline expectations use a simple seasonal hierarchy (month+dow, then month, then dow).",
    "Treat missing dates as unknown coverage (dataset includes only transaction-days).",
];

/// Actual value of a driver and its mean over all days
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DriverValue {
    pub actual: f64,
    pub baseline_mean: f64,
}

impl DriverValue {
    pub fn delta(&self) -> f64 {
        self.actual - self.baseline_mean
    }
}

/// Revenue drivers (revenue = txns x aov)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Drivers {
    pub txns: DriverValue,
    pub units: DriverValue,
    pub aov: DriverValue,
}

/// Highest-revenue category of the day
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopCategory {
    pub name: Option<String>,
    pub revenue: Option<f64>,
    pub share: Option<f64>,
}

/// Exportable explanation of one spike day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpikeCard {
    pub date: NaiveDate,
    pub dow: DayOfWeek,
    pub actual_revenue: f64,
    pub expected_revenue: f64,
    pub delta_revenue: f64,
    /// Percent change against expectation; absent when nothing was expected
    pub delta_pct: Option<f64>,
    pub score: f64,
    pub drivers: Drivers,
    pub top_category: TopCategory,
    pub notes: Vec<String>,
}

/// Difference between a driver's actual value and its mean
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverDelta {
    pub name: &'static str,
    pub actual: f64,
    pub baseline_mean: f64,
    pub delta: f64,
}

/// Driver means over every scored day
#[derive(Debug, Clone, Copy)]
struct DriverMeans {
    txns: f64,
    units: f64,
    aov: f64,
}

impl DriverMeans {
    fn from_scored(scored: &[ScoredDay]) -> Self {
        let column = |f: fn(&ScoredDay) -> f64| mean(&scored.iter().map(f).collect::<Vec<_>>());
        Self {
            txns: column(|d| d.txns as f64),
            units: column(|d| d.units),
            aov: column(|d| d.aov),
        }
    }
}

fn top_category(date: NaiveDate, mix: &[CategoryMixRow]) -> TopCategory {
    // min_by keeps the first of equal elements, so ties go to the first category name
    mix.iter()
        .filter(|row| row.date == date)
        .min_by(|a, b| b.category_revenue.cmp(&a.category_revenue))
        .map(|row| TopCategory {
            name: Some(row.product_category.clone()),
            revenue: Some(row.category_revenue.as_f64()),
            share: Some(row.category_share),
        })
        .unwrap_or_default()
}

fn build_card(
    day: &ScoredDay,
    means: DriverMeans,
    mix: &[CategoryMixRow],
    by: ScoreBy,
) -> SpikeCard {
    let actual = day.revenue.as_f64();
    let expected = day.expected_revenue;
    let delta = actual - expected;

    SpikeCard {
        date: day.date,
        dow: day.dow,
        actual_revenue: actual,
        expected_revenue: expected,
        delta_revenue: delta,
        delta_pct: (expected != 0.0).then(|| delta / expected * 100.0),
        score: by.score(day),
        drivers: Drivers {
            txns: DriverValue {
                actual: day.txns as f64,
                baseline_mean: means.txns,
            },
            units: DriverValue {
                actual: day.units,
                baseline_mean: means.units,
            },
            aov: DriverValue {
                actual: day.aov,
                baseline_mean: means.aov,
            },
        },
        top_category: top_category(day.date, mix),
        notes: CARD_NOTES.iter().map(|n| n.to_string()).collect(),
    }
}

/// Spike cards for the `top_n` highest-scoring days
pub fn build_spike_cards(
    scored: &[ScoredDay],
    mix: &[CategoryMixRow],
    top_n: usize,
    by: ScoreBy,
) -> Vec<SpikeCard> {
    let means = DriverMeans::from_scored(scored);
    top_spike_days(scored, top_n, by)
        .iter()
        .map(|day| build_card(day, means, mix, by))
        .collect()
}

/// Spike card for any observed date
pub fn card_for_date(
    scored: &[ScoredDay],
    mix: &[CategoryMixRow],
    date: NaiveDate,
    by: ScoreBy,
) -> PulseResult<SpikeCard> {
    let day = scored
        .iter()
        .find(|d| d.date == date)
        .ok_or_else(|| PulseError::day_not_found(date.to_string()))?;
    Ok(build_card(day, DriverMeans::from_scored(scored), mix, by))
}

/// Actual minus mean for each driver, in txns / units / aov order
pub fn driver_deltas(card: &SpikeCard) -> Vec<DriverDelta> {
    let drivers = &card.drivers;
    [
        ("txns", drivers.txns),
        ("units", drivers.units),
        ("aov", drivers.aov),
    ]
    .into_iter()
    .map(|(name, value)| DriverDelta {
        name,
        actual: value.actual,
        baseline_mean: value.baseline_mean,
        delta: value.delta(),
    })
    .collect()
}
