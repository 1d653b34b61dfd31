//! JSON Export functionality
//!
//! Pretty-printed documents for spike cards and the quality summary.

use std::io::Write;

use serde::Serialize;

use crate::error::{PulseError, PulseResult};

/// Write a value as pretty JSON followed by a newline
pub fn export_json<T: Serialize, W: Write>(value: &T, writer: &mut W) -> PulseResult<()> {
    serde_json::to_writer_pretty(&mut *writer, value)
        .map_err(|e| PulseError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| PulseError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::QualitySummary;
    use chrono::NaiveDate;

    #[test]
    fn test_quality_summary_keys() {
        let summary = QualitySummary {
            n_rows: 10,
            n_missing_any: 1,
            n_negative_quantity: 0,
            n_negative_price: 0,
            n_negative_total: 2,
            date_min: NaiveDate::from_ymd_opt(2023, 1, 1),
            date_max: NaiveDate::from_ymd_opt(2023, 12, 31),
            total_amount_mismatches: 3,
        };

        let mut out = Vec::new();
        export_json(&summary, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.ends_with("}\n"));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["n_rows"], 10);
        assert_eq!(value["date_min"], "2023-01-01");
        assert_eq!(value["total_amount_mismatches"], 3);
    }
}
