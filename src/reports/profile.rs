//! Dataset profile shown at the top of the insights report

use chrono::NaiveDate;
use serde::Serialize;

use crate::ingest::Dataset;

/// Size, coverage and categories of the loaded data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetProfile {
    pub n_rows: usize,
    /// Distinct transaction-days
    pub n_days: usize,
    pub date_min: Option<NaiveDate>,
    pub date_max: Option<NaiveDate>,
    /// Sorted distinct product categories
    pub categories: Vec<String>,
    pub total_amount_mismatches: usize,
}

impl DatasetProfile {
    /// Profile a dataset given the identity-check mismatch count
    pub fn from_dataset(dataset: &Dataset, total_amount_mismatches: usize) -> Self {
        let (date_min, date_max) = dataset.date_range().unzip();
        Self {
            n_rows: dataset.n_rows(),
            n_days: dataset.n_days(),
            date_min,
            date_max,
            categories: dataset.categories(),
            total_amount_mismatches,
        }
    }

    /// Calendar days spanned by the data, inclusive
    pub fn span_days(&self) -> usize {
        match (self.date_min, self.date_max) {
            (Some(min), Some(max)) => (max - min).num_days().max(0) as usize + 1,
            _ => 0,
        }
    }

    /// Share of calendar days in the span that have transactions
    pub fn coverage(&self) -> f64 {
        match self.span_days() {
            0 => 0.0,
            span => self.n_days as f64 / span as f64,
        }
    }
}
