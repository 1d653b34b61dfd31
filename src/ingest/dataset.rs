//! Loaded dataset and its basic profile

use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::models::Transaction;

/// All transactions read from one input file
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Parsed transactions in file order
    pub transactions: Vec<Transaction>,
    /// Where the data came from (file path or a label)
    pub source: String,
}

impl Dataset {
    /// Create a dataset from already-parsed transactions
    pub fn new(transactions: Vec<Transaction>, source: impl Into<String>) -> Self {
        Self {
            transactions,
            source: source.into(),
        }
    }

    /// Number of input rows
    pub fn n_rows(&self) -> usize {
        self.transactions.len()
    }

    /// Whether no rows were loaded
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Number of distinct transaction-days
    pub fn n_days(&self) -> usize {
        self.transactions
            .iter()
            .map(|t| t.date)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Earliest and latest date, if any rows exist
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.transactions.iter().map(|t| t.date).min()?;
        let max = self.transactions.iter().map(|t| t.date).max()?;
        Some((min, max))
    }

    /// Sorted distinct product categories
    pub fn categories(&self) -> Vec<String> {
        self.transactions
            .iter()
            .map(|t| t.product_category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn txn(d: u32, id: &str, category: &str) -> Transaction {
        Transaction::new(NaiveDate::from_ymd_opt(2023, 1, d).unwrap(), id)
            .with_category(category)
            .with_amounts(1.0, Money::from_cents(100), Money::from_cents(100))
    }

    #[test]
    fn test_profile_helpers() {
        let dataset = Dataset::new(
            vec![
                txn(3, "1", "Clothing"),
                txn(1, "2", "Beauty"),
                txn(3, "3", "Beauty"),
            ],
            "test",
        );

        assert_eq!(dataset.n_rows(), 3);
        assert_eq!(dataset.n_days(), 2);
        assert_eq!(
            dataset.date_range(),
            Some((
                NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2023, 1, 3).unwrap()
            ))
        );
        assert_eq!(dataset.categories(), vec!["Beauty", "Clothing"]);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::default();
        assert!(dataset.is_empty());
        assert_eq!(dataset.date_range(), None);
    }
}
