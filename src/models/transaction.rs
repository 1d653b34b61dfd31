//! Retail transaction model
//!
//! One row of the input sales file. Numeric columns are optional: values
//! that fail to parse are kept as missing instead of rejecting the row, so
//! the quality checks can count them.

use chrono::NaiveDate;
use serde::Serialize;

use super::calendar::CalendarFields;
use super::money::Money;

/// A single retail transaction line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// Day of the sale (time of day is dropped)
    pub date: NaiveDate,

    /// Transaction identifier
    pub transaction_id: String,

    /// Customer identifier
    pub customer_id: String,

    /// Customer gender as recorded
    pub gender: String,

    /// Customer age, if parseable
    pub age: Option<u32>,

    /// Product category
    pub product_category: String,

    /// Units sold, if parseable
    pub quantity: Option<f64>,

    /// Unit price, if parseable
    pub price_per_unit: Option<Money>,

    /// Line total, if parseable
    pub total_amount: Option<Money>,

    /// Derived calendar fields
    #[serde(skip)]
    pub calendar: CalendarFields,
}

impl Transaction {
    /// Create a transaction with the required identity fields
    ///
    /// Remaining fields start empty and are filled by the caller.
    pub fn new(date: NaiveDate, transaction_id: impl Into<String>) -> Self {
        Self {
            date,
            transaction_id: transaction_id.into(),
            customer_id: String::new(),
            gender: String::new(),
            age: None,
            product_category: String::new(),
            quantity: None,
            price_per_unit: None,
            total_amount: None,
            calendar: CalendarFields::from_date(date),
        }
    }

    /// Builder-style setter for the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.product_category = category.into();
        self
    }

    /// Builder-style setter for quantity, price and total
    pub fn with_amounts(mut self, quantity: f64, price: Money, total: Money) -> Self {
        self.quantity = Some(quantity);
        self.price_per_unit = Some(price);
        self.total_amount = Some(total);
        self
    }

    /// Whether any field is missing or blank
    pub fn has_missing(&self) -> bool {
        self.transaction_id.trim().is_empty()
            || self.customer_id.trim().is_empty()
            || self.gender.trim().is_empty()
            || self.product_category.trim().is_empty()
            || self.age.is_none()
            || self.quantity.is_none()
            || self.price_per_unit.is_none()
            || self.total_amount.is_none()
    }

    /// Revenue contributed by this line (missing totals contribute nothing)
    pub fn revenue(&self) -> Money {
        self.total_amount.unwrap_or_default()
    }

    /// Units contributed by this line (missing quantities contribute nothing)
    pub fn units(&self) -> f64 {
        self.quantity.unwrap_or(0.0)
    }
}
