//! Custom error types for Retail Pulse
//!
//! This module defines the error hierarchy for the library using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Retail Pulse operations
#[derive(Error, Debug)]
pub enum PulseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Validation errors for inputs and options
    #[error("Validation error: {0}")]
    Validation(String),

    /// Input CSV lacks one or more required columns
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A date cell could not be parsed
    #[error("Invalid date '{value}' on data row {row}")]
    InvalidDate { row: usize, value: String },

    /// Input contained a header but no data rows
    #[error("Dataset is empty: {0}")]
    EmptyDataset(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl PulseError {
    /// Create a "not found" error for a calendar day
    pub fn day_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Day",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for a column
    pub fn column_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Column",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for PulseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PulseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for PulseError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<csv::Error> for PulseError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for Retail Pulse operations
pub type PulseResult<T> = Result<T, PulseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PulseError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = PulseError::day_not_found("2023-01-01");
        assert_eq!(err.to_string(), "Day not found: 2023-01-01");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_missing_columns_lists_all() {
        let err = PulseError::MissingColumns(vec!["age".into(), "gender".into()]);
        assert_eq!(err.to_string(), "Missing required columns: age, gender");
    }

    #[test]
    fn test_invalid_date_error() {
        let err = PulseError::InvalidDate {
            row: 3,
            value: "not-a-date".into(),
        };
        assert_eq!(err.to_string(), "Invalid date 'not-a-date' on data row 3");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let pulse_err: PulseError = io_err.into();
        assert!(matches!(pulse_err, PulseError::Io(_)));
    }
}
