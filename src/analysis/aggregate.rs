//! Daily and weekly aggregation
//!
//! Collapses line-level transactions into one row per transaction-day, one
//! row per week ending Sunday, and one row per (day, category).

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use tracing::debug;

use super::stats::ratio;
use crate::ingest::Dataset;
use crate::models::{
    CalendarFields, CategoryMixRow, DailyMetrics, Money, Transaction, WeekKey, WeeklyMetrics,
};

/// Running totals for one group of transactions
#[derive(Default)]
struct Totals<'a> {
    revenue: Money,
    units: f64,
    transaction_ids: HashSet<&'a str>,
    dates: HashSet<NaiveDate>,
}

impl<'a> Totals<'a> {
    fn add(&mut self, txn: &'a Transaction) {
        self.revenue += txn.revenue();
        self.units += txn.units();
        self.transaction_ids.insert(txn.transaction_id.as_str());
        self.dates.insert(txn.date);
    }

    fn txns(&self) -> usize {
        self.transaction_ids.len()
    }

    /// Revenue per distinct transaction
    fn aov(&self) -> f64 {
        ratio(self.revenue.as_f64(), self.txns() as f64)
    }
}

/// One row per transaction-day, ordered by date
pub fn daily_metrics(dataset: &Dataset) -> Vec<DailyMetrics> {
    let mut by_day: BTreeMap<NaiveDate, Totals> = BTreeMap::new();
    for txn in &dataset.transactions {
        by_day.entry(txn.date).or_default().add(txn);
    }

    let rows: Vec<DailyMetrics> = by_day
        .into_iter()
        .map(|(date, totals)| {
            let calendar = CalendarFields::from_date(date);
            DailyMetrics {
                date,
                revenue: totals.revenue,
                txns: totals.txns(),
                units: totals.units,
                aov: totals.aov(),
                dow: calendar.dow,
                month: calendar.month,
                week: calendar.week,
            }
        })
        .collect();

    debug!(days = rows.len(), "aggregated daily metrics");
    rows
}

/// One row per week ending Sunday, ordered by week
pub fn weekly_metrics(dataset: &Dataset) -> Vec<WeeklyMetrics> {
    let mut by_week: BTreeMap<WeekKey, Totals> = BTreeMap::new();
    for txn in &dataset.transactions {
        by_week.entry(txn.calendar.week).or_default().add(txn);
    }

    let rows: Vec<WeeklyMetrics> = by_week
        .into_iter()
        .map(|(week, totals)| WeeklyMetrics {
            week,
            revenue: totals.revenue,
            txns: totals.txns(),
            units: totals.units,
            aov: totals.aov(),
            n_days: totals.dates.len(),
        })
        .collect();

    debug!(weeks = rows.len(), "aggregated weekly metrics");
    rows
}

/// Revenue per (day, category) with the category's share of the day
///
/// Ordered by date, then category name.
pub fn daily_category_mix(dataset: &Dataset) -> Vec<CategoryMixRow> {
    let mut by_cell: BTreeMap<(NaiveDate, &str), Money> = BTreeMap::new();
    let mut day_totals: BTreeMap<NaiveDate, Money> = BTreeMap::new();

    for txn in &dataset.transactions {
        *by_cell
            .entry((txn.date, txn.product_category.as_str()))
            .or_default() += txn.revenue();
        *day_totals.entry(txn.date).or_default() += txn.revenue();
    }

    by_cell
        .into_iter()
        .map(|((date, category), category_revenue)| {
            let day_revenue = day_totals.get(&date).copied().unwrap_or_default();
            CategoryMixRow {
                date,
                product_category: category.to_string(),
                category_revenue,
                day_revenue,
                category_share: ratio(category_revenue.as_f64(), day_revenue.as_f64()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayOfWeek;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, d).unwrap()
    }

    fn txn(day: u32, id: &str, category: &str, qty: f64, total: i64) -> Transaction {
        Transaction::new(date(day), id).with_category(category).with_amounts(
            qty,
            Money::from_cents(total / qty.max(1.0) as i64),
            Money::from_cents(total),
        )
    }

    fn dataset() -> Dataset {
        // 2023-01-01 is a Sunday, 01-02 a Monday
        Dataset::new(
            vec![
                txn(2, "a", "Beauty", 2.0, 10000),
                txn(2, "b", "Clothing", 1.0, 5000),
                txn(2, "b", "Beauty", 1.0, 1000),
                txn(1, "c", "Electronics", 3.0, 30000),
                txn(8, "d", "Beauty", 1.0, 2000),
            ],
            "test",
        )
    }

    #[test]
    fn test_daily_metrics() {
        let daily = daily_metrics(&dataset());
        assert_eq!(daily.len(), 3);

        assert_eq!(daily[0].date, date(1));
        assert_eq!(daily[0].dow, DayOfWeek::Sunday);

        let monday = &daily[1];
        assert_eq!(monday.revenue, Money::from_cents(16000));
        assert_eq!(monday.txns, 2);
        assert_eq!(monday.units, 4.0);
        assert!((monday.aov - 80.0).abs() < 1e-9);
        assert_eq!(monday.week.to_string(), "2023-01-02/2023-01-08");
    }

    #[test]
    fn test_missing_amounts_are_skipped() {
        let mut partial = txn(3, "x", "Beauty", 1.0, 500);
        partial.total_amount = None;
        partial.quantity = None;

        let daily = daily_metrics(&Dataset::new(vec![partial], "test"));
        assert_eq!(daily[0].revenue, Money::zero());
        assert_eq!(daily[0].units, 0.0);
        assert_eq!(daily[0].txns, 1);
        assert_eq!(daily[0].aov, 0.0);
    }

    #[test]
    fn test_weekly_metrics() {
        let weekly = weekly_metrics(&dataset());
        assert_eq!(weekly.len(), 2);

        // Sunday 01-01 closes the week starting 2022-12-26
        assert_eq!(weekly[0].week.to_string(), "2022-12-26/2023-01-01");
        assert_eq!(weekly[0].n_days, 1);

        assert_eq!(weekly[1].revenue, Money::from_cents(18000));
        assert_eq!(weekly[1].txns, 3);
        assert_eq!(weekly[1].n_days, 2);
    }

    #[test]
    fn test_category_mix() {
        let mix = daily_category_mix(&dataset());
        let monday: Vec<_> = mix.iter().filter(|r| r.date == date(2)).collect();

        assert_eq!(monday.len(), 2);
        assert_eq!(monday[0].product_category, "Beauty");
        assert_eq!(monday[0].category_revenue, Money::from_cents(11000));
        assert_eq!(monday[0].day_revenue, Money::from_cents(16000));
        assert!((monday[0].category_share - 0.6875).abs() < 1e-9);

        let shares: f64 = monday.iter().map(|r| r.category_share).sum();
        assert!((shares - 1.0).abs() < 1e-9);
    }
}
