//! Seasonal baseline of expected daily revenue
//!
//! Expected revenue for a day comes from the most specific level of the
//! hierarchy that has at least `min_cell_days` observations:
//! (month, weekday) cell, then month, then weekday, then the overall mean.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

use super::stats::mean;
use crate::models::{BaselineLevel, DailyMetrics};

/// Default minimum number of days a level needs before it is used
pub const DEFAULT_MIN_CELL_DAYS: usize = 2;

/// Expected revenue per daily row, aligned with the input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Baseline {
    pub expected: Vec<f64>,
    /// Level of the hierarchy that produced each expectation
    pub levels: Vec<BaselineLevel>,
}

impl Baseline {
    pub fn len(&self) -> usize {
        self.expected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expected.is_empty()
    }

    /// Pairs of (expected revenue, level) in row order
    pub fn iter(&self) -> impl Iterator<Item = (f64, BaselineLevel)> + '_ {
        self.expected.iter().copied().zip(self.levels.iter().copied())
    }
}

/// Mean and count of revenue per group key
fn group_means<K, F>(daily: &[DailyMetrics], key: F) -> HashMap<K, (f64, usize)>
where
    K: Eq + Hash,
    F: Fn(&DailyMetrics) -> K,
{
    let mut groups: HashMap<K, Vec<f64>> = HashMap::new();
    for day in daily {
        groups.entry(key(day)).or_default().push(day.revenue.as_f64());
    }
    groups
        .into_iter()
        .map(|(k, values)| (k, (mean(&values), values.len())))
        .collect()
}

/// Expected revenue for each day using the seasonal mean hierarchy
pub fn expected_revenue_month_dow(daily: &[DailyMetrics], min_cell_days: usize) -> Baseline {
    if daily.is_empty() {
        return Baseline::default();
    }

    let revenue: Vec<f64> = daily.iter().map(|d| d.revenue.as_f64()).collect();
    let overall = mean(&revenue);

    let cells = group_means(daily, |d| (d.month, d.dow));
    let months = group_means(daily, |d| d.month);
    let dows = group_means(daily, |d| d.dow);

    let usable = |entry: Option<&(f64, usize)>| {
        entry
            .filter(|(_, count)| *count >= min_cell_days)
            .map(|(m, _)| *m)
    };

    let mut baseline = Baseline::default();
    for day in daily {
        let (expected, level) = usable(cells.get(&(day.month, day.dow)))
            .map(|m| (m, BaselineLevel::MonthDow))
            .or_else(|| usable(months.get(&day.month)).map(|m| (m, BaselineLevel::Month)))
            .or_else(|| usable(dows.get(&day.dow)).map(|m| (m, BaselineLevel::Dow)))
            .unwrap_or((overall, BaselineLevel::Overall));

        baseline.expected.push(expected);
        baseline.levels.push(level);
    }

    debug!(
        days = baseline.len(),
        month_dow = baseline.levels.iter().filter(|l| **l == BaselineLevel::MonthDow).count(),
        overall,
        "built seasonal baseline"
    );
    baseline
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CalendarFields, Money};
    use chrono::NaiveDate;

    fn day(m: u32, d: u32, revenue: i64) -> DailyMetrics {
        let date = NaiveDate::from_ymd_opt(2023, m, d).unwrap();
        let cal = CalendarFields::from_date(date);
        DailyMetrics {
            date,
            revenue: Money::from_cents(revenue * 100),
            txns: 1,
            units: 1.0,
            aov: revenue as f64,
            dow: cal.dow,
            month: cal.month,
            week: cal.week,
        }
    }

    #[test]
    fn test_hierarchy_levels() {
        let daily = vec![
            day(1, 2, 100),  // Jan Monday
            day(1, 9, 300),  // Jan Monday
            day(1, 3, 50),   // Jan Tuesday, single cell day -> month
            day(2, 7, 70),   // Feb Tuesday, single month day -> dow (Tuesday x2)
            day(3, 4, 1000), // Mar Saturday, nothing else -> overall
        ];

        let baseline = expected_revenue_month_dow(&daily, 2);
        assert_eq!(baseline.len(), 5);

        assert_eq!(baseline.levels[0], BaselineLevel::MonthDow);
        assert!((baseline.expected[0] - 200.0).abs() < 1e-9);

        assert_eq!(baseline.levels[2], BaselineLevel::Month);
        assert!((baseline.expected[2] - 150.0).abs() < 1e-9);

        assert_eq!(baseline.levels[3], BaselineLevel::Dow);
        assert!((baseline.expected[3] - 60.0).abs() < 1e-9);

        assert_eq!(baseline.levels[4], BaselineLevel::Overall);
        assert!((baseline.expected[4] - 304.0).abs() < 1e-9);
    }

    #[test]
    fn test_min_cell_days_one_uses_cells() {
        let daily = vec![day(1, 2, 100), day(1, 3, 50)];
        let baseline = expected_revenue_month_dow(&daily, 1);
        assert!(baseline.levels.iter().all(|l| *l == BaselineLevel::MonthDow));
        assert_eq!(baseline.expected, vec![100.0, 50.0]);
    }

    #[test]
    fn test_empty_input() {
        assert!(expected_revenue_month_dow(&[], DEFAULT_MIN_CELL_DAYS).is_empty());
    }
}
