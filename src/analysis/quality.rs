//! Data quality checks
//!
//! Simple counts over the raw transactions plus a per-row check that the
//! line total equals quantity x unit price.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ingest::Dataset;
use crate::models::Money;

/// Summary of simple quality statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualitySummary {
    pub n_rows: usize,
    /// Rows with at least one missing or unparseable field
    pub n_missing_any: usize,
    /// Rows with quantity <= 0
    pub n_negative_quantity: usize,
    /// Rows with unit price <= 0
    pub n_negative_price: usize,
    /// Rows with line total <= 0
    pub n_negative_total: usize,
    pub date_min: Option<NaiveDate>,
    pub date_max: Option<NaiveDate>,
    /// Rows where total != quantity x price
    #[serde(default)]
    pub total_amount_mismatches: usize,
}

impl QualitySummary {
    /// Attach the identity-check mismatch count
    pub fn with_mismatches(mut self, checks: &[IdentityCheck]) -> Self {
        self.total_amount_mismatches = checks.iter().filter(|c| c.is_mismatch).count();
        self
    }

    /// Whether every check came back clean
    pub fn is_clean(&self) -> bool {
        self.n_missing_any == 0
            && self.n_negative_quantity == 0
            && self.n_negative_price == 0
            && self.n_negative_total == 0
            && self.total_amount_mismatches == 0
    }
}

/// Result of the total-amount identity check for one row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentityCheck {
    pub transaction_id: String,
    pub date: NaiveDate,
    pub quantity: Option<f64>,
    pub price_per_unit: Option<Money>,
    pub total_amount: Option<Money>,
    /// quantity x price, when both are present
    pub expected_total: Option<Money>,
    /// |total - expected|, when all operands are present
    pub abs_error: Option<Money>,
    pub is_mismatch: bool,
}

/// Count missing values, non-positive amounts and the date range
pub fn basic_sanity_checks(dataset: &Dataset) -> QualitySummary {
    let txns = &dataset.transactions;
    let (date_min, date_max) = dataset.date_range().unzip();

    let summary = QualitySummary {
        n_rows: txns.len(),
        n_missing_any: txns.iter().filter(|t| t.has_missing()).count(),
        n_negative_quantity: txns
            .iter()
            .filter(|t| t.quantity.is_some_and(|q| q <= 0.0))
            .count(),
        n_negative_price: txns
            .iter()
            .filter(|t| t.price_per_unit.is_some_and(|p| !p.is_positive()))
            .count(),
        n_negative_total: txns
            .iter()
            .filter(|t| t.total_amount.is_some_and(|a| !a.is_positive()))
            .count(),
        date_min,
        date_max,
        total_amount_mismatches: 0,
    };

    debug!(?summary, "computed sanity checks");
    summary
}

/// Check `total_amount == quantity * price_per_unit` for every row
///
/// Amounts are compared in whole cents; rows missing an operand are never
/// counted as mismatches.
pub fn check_total_amount_identity(dataset: &Dataset) -> Vec<IdentityCheck> {
    let checks: Vec<IdentityCheck> = dataset
        .transactions
        .iter()
        .map(|t| {
            let expected_total = match (t.quantity, t.price_per_unit) {
                (Some(q), Some(p)) => Some(p.mul_quantity(q)),
                _ => None,
            };
            let abs_error = match (t.total_amount, expected_total) {
                (Some(actual), Some(expected)) => Some((actual - expected).abs()),
                _ => None,
            };

            IdentityCheck {
                transaction_id: t.transaction_id.clone(),
                date: t.date,
                quantity: t.quantity,
                price_per_unit: t.price_per_unit,
                total_amount: t.total_amount,
                expected_total,
                abs_error,
                is_mismatch: abs_error.is_some_and(|e| !e.is_zero()),
            }
        })
        .collect();

    let mismatches = checks.iter().filter(|c| c.is_mismatch).count();
    if mismatches > 0 {
        warn!(mismatches, "total_amount differs from quantity x price_per_unit");
    }
    checks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transaction;

    fn txn(day: u32, id: &str, qty: f64, price: i64, total: i64) -> Transaction {
        Transaction::new(NaiveDate::from_ymd_opt(2023, 1, day).unwrap(), id)
            .with_category("Beauty")
            .with_amounts(qty, Money::from_cents(price), Money::from_cents(total))
    }

    fn complete(mut t: Transaction) -> Transaction {
        t.customer_id = "C".into();
        t.gender = "Female".into();
        t.age = Some(30);
        t
    }

    #[test]
    fn test_sanity_counts() {
        let mut missing = complete(txn(2, "3", 1.0, 100, 100));
        missing.total_amount = None;

        let dataset = Dataset::new(
            vec![
                complete(txn(1, "1", 2.0, 500, 1000)),
                complete(txn(5, "2", 0.0, -100, 0)),
                missing,
            ],
            "test",
        );

        let summary = basic_sanity_checks(&dataset);
        assert_eq!(summary.n_rows, 3);
        assert_eq!(summary.n_missing_any, 1);
        assert_eq!(summary.n_negative_quantity, 1);
        assert_eq!(summary.n_negative_price, 1);
        // Missing totals are not counted as non-positive
        assert_eq!(summary.n_negative_total, 1);
        assert_eq!(summary.date_min, NaiveDate::from_ymd_opt(2023, 1, 1));
        assert_eq!(summary.date_max, NaiveDate::from_ymd_opt(2023, 1, 5));
        assert!(!summary.is_clean());
    }

    #[test]
    fn test_identity_check() {
        let mut no_qty = txn(1, "3", 1.0, 100, 100);
        no_qty.quantity = None;

        let dataset = Dataset::new(
            vec![txn(1, "1", 3.0, 5000, 15000), txn(1, "2", 2.0, 25, 60), no_qty],
            "test",
        );

        let checks = check_total_amount_identity(&dataset);
        assert!(!checks[0].is_mismatch);
        assert_eq!(checks[0].expected_total, Some(Money::from_cents(15000)));

        assert!(checks[1].is_mismatch);
        assert_eq!(checks[1].abs_error, Some(Money::from_cents(10)));

        assert!(!checks[2].is_mismatch);
        assert_eq!(checks[2].expected_total, None);

        let summary = basic_sanity_checks(&dataset).with_mismatches(&checks);
        assert_eq!(summary.total_amount_mismatches, 1);
    }
}
