//! Column mapping for the retail sales CSV
//!
//! Header names are normalised to snake_case before matching, so
//! "Transaction ID", "transaction-id" and "transaction_id" all map to the
//! same column.

use csv::StringRecord;

use crate::error::{PulseError, PulseResult};

/// Columns every input file must provide (after normalisation)
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "date",
    "transaction_id",
    "customer_id",
    "gender",
    "age",
    "product_category",
    "quantity",
    "price_per_unit",
    "total_amount",
];

/// Normalise a header name: trim, replace separators with `_`, lowercase
pub fn to_snake_case(name: &str) -> String {
    name.trim()
        .trim_start_matches('\u{feff}')
        .replace([' ', '-', '/'], "_")
        .to_lowercase()
}

/// Column indices of the required fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date: usize,
    pub transaction_id: usize,
    pub customer_id: usize,
    pub gender: usize,
    pub age: usize,
    pub product_category: usize,
    pub quantity: usize,
    pub price_per_unit: usize,
    pub total_amount: usize,
}

impl ColumnMapping {
    /// Build a mapping from a header record
    ///
    /// Fails if there is no `date` column, or lists every other required
    /// column that is absent.
    pub fn from_headers(headers: &StringRecord) -> PulseResult<Self> {
        let normalised: Vec<String> = headers.iter().map(to_snake_case).collect();
        let find = |name: &str| normalised.iter().position(|h| h == name);

        if find("date").is_none() {
            return Err(PulseError::Validation(
                "Expected a 'Date' column in the input CSV.".into(),
            ));
        }

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| find(**c).is_none())
            .map(|c| (*c).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(PulseError::MissingColumns(missing));
        }

        let index = |name: &str| find(name).ok_or_else(|| PulseError::column_not_found(name));

        Ok(Self {
            date: index("date")?,
            transaction_id: index("transaction_id")?,
            customer_id: index("customer_id")?,
            gender: index("gender")?,
            age: index("age")?,
            product_category: index("product_category")?,
            quantity: index("quantity")?,
            price_per_unit: index("price_per_unit")?,
            total_amount: index("total_amount")?,
        })
    }
}
