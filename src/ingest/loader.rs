//! CSV loader
//!
//! Parses the retail sales CSV into transactions: date parsing with
//! fallbacks, coercion of numeric columns and derived calendar fields.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use super::dataset::Dataset;
use super::mapping::ColumnMapping;
use crate::config::Settings;
use crate::error::{PulseError, PulseResult};
use crate::models::{CalendarFields, Money, Transaction};

/// Date formats tried after the configured one
const FALLBACK_DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d", "%m-%d-%Y", "%d-%m-%Y", "%m/%d/%y", "%d.%m.%Y",
];

/// Loader for the retail sales CSV
#[derive(Debug, Clone)]
pub struct CsvLoader {
    /// Preferred date format (strftime)
    date_format: String,
    /// Field delimiter
    delimiter: u8,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
            delimiter: b',',
        }
    }
}

impl CsvLoader {
    /// Create a loader with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader using the date format and delimiter from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::default()
            .with_date_format(&settings.date_format)
            .with_delimiter(settings.delimiter)
    }

    /// Set the preferred date format
    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    /// Set the delimiter (non-ASCII characters fall back to `,`)
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = if delimiter.is_ascii() {
            delimiter as u8
        } else {
            b','
        };
        self
    }

    /// Load a CSV file from disk
    pub fn load_path(&self, path: impl AsRef<Path>) -> PulseResult<Dataset> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| PulseError::Io(format!("Failed to open {}: {}", path.display(), e)))?;
        self.load_reader(file, path.display().to_string())
    }

    /// Load CSV data from any reader
    pub fn load_reader<R: Read>(
        &self,
        reader: R,
        source: impl Into<String>,
    ) -> PulseResult<Dataset> {
        let source = source.into();
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let mapping = ColumnMapping::from_headers(&headers)?;
        debug!(?mapping, source = %source, "mapped input columns");

        let mut transactions = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            if record.iter().all(|field| field.is_empty()) {
                continue;
            }
            transactions.push(self.parse_record(&record, idx + 1, &mapping)?);
        }

        if transactions.is_empty() {
            return Err(PulseError::EmptyDataset(format!(
                "no data rows in {}",
                source
            )));
        }

        info!(rows = transactions.len(), source = %source, "loaded retail transactions");
        Ok(Dataset::new(transactions, source))
    }

    /// Parse a single CSV record (`row` is 1-based, excluding the header)
    fn parse_record(
        &self,
        record: &StringRecord,
        row: usize,
        mapping: &ColumnMapping,
    ) -> PulseResult<Transaction> {
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let date_str = field(mapping.date);
        let date = self
            .parse_date(date_str)
            .ok_or_else(|| PulseError::InvalidDate {
                row,
                value: date_str.to_string(),
            })?;

        Ok(Transaction {
            date,
            transaction_id: field(mapping.transaction_id).to_string(),
            customer_id: field(mapping.customer_id).to_string(),
            gender: field(mapping.gender).to_string(),
            age: parse_age(field(mapping.age)),
            product_category: field(mapping.product_category).to_string(),
            quantity: parse_number(field(mapping.quantity)),
            price_per_unit: parse_money(field(mapping.price_per_unit)),
            total_amount: parse_money(field(mapping.total_amount)),
            calendar: CalendarFields::from_date(date),
        })
    }

    /// Parse a date using the preferred format, then the fallbacks.
    /// A trailing time part (`14:30`, `T09:00:00Z`, ...) is dropped.
    fn parse_date(&self, s: &str) -> Option<NaiveDate> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        self.parse_day(s).or_else(|| {
            let (day, time) = s.split_once(|c: char| c.is_whitespace() || c == 'T')?;
            if !time.trim_start().starts_with(|c: char| c.is_ascii_digit()) {
                return None;
            }
            self.parse_day(day)
        })
    }

    fn parse_day(&self, s: &str) -> Option<NaiveDate> {
        std::iter::once(self.date_format.as_str())
            .chain(FALLBACK_DATE_FORMATS)
            .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
    }
}

/// Parse a float, treating blanks and non-finite values as missing
fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a whole, non-negative age
fn parse_age(s: &str) -> Option<u32> {
    parse_number(s)
        .filter(|v| *v >= 0.0 && v.fract() == 0.0 && *v <= f64::from(u32::MAX))
        .map(|v| v as u32)
}

/// Parse a money amount, treating failures as missing
fn parse_money(s: &str) -> Option<Money> {
    if s.trim().is_empty() {
        return None;
    }
    Money::parse(s).ok()
}
