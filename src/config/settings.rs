//! User settings for Retail Pulse
//!
//! Manages analysis defaults (baseline cell size, number of spike days,
//! spike threshold) and input/output preferences. Every field has a default
//! so older or partial settings files keep loading.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::PulsePaths;
use crate::analysis::spikes::ScoreBy;
use crate::error::PulseError;
use crate::export::ExportFormat;

/// User settings for Retail Pulse
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Minimum observations before a (month, weekday) cell mean is trusted
    #[serde(default = "default_min_cell_days")]
    pub min_cell_days: usize,

    /// Number of spike days to export
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Score used to rank spike days
    #[serde(default)]
    pub score_by: ScoreBy,

    /// Robust z-score at or above which a day is flagged as a spike
    #[serde(default = "default_spike_threshold")]
    pub spike_threshold: f64,

    /// Preferred input date format (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Input CSV delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Currency symbol used in terminal output and the report
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Default output directory for CSV/JSON artifacts
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Default Markdown report path
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,

    /// Format used for spike cards and the quality summary
    #[serde(default)]
    pub export_format: ExportFormat,
}

fn default_schema_version() -> u32 {
    1
}

fn default_min_cell_days() -> usize {
    2
}

fn default_top_n() -> usize {
    15
}

fn default_spike_threshold() -> f64 {
    3.5
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_delimiter() -> char {
    ','
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("outputs")
}

fn default_report_path() -> PathBuf {
    PathBuf::from("reports").join("insights.md")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            min_cell_days: default_min_cell_days(),
            top_n: default_top_n(),
            score_by: ScoreBy::default(),
            spike_threshold: default_spike_threshold(),
            date_format: default_date_format(),
            delimiter: default_delimiter(),
            currency_symbol: default_currency(),
            output_dir: default_output_dir(),
            report_path: default_report_path(),
            export_format: ExportFormat::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &PulsePaths) -> Result<Self, PulseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| PulseError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                PulseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PulsePaths) -> Result<(), PulseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PulseError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| PulseError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject values the analysis cannot work with
    pub fn validate(&self) -> Result<(), PulseError> {
        if self.min_cell_days == 0 {
            return Err(PulseError::Config(
                "min_cell_days must be at least 1".into(),
            ));
        }
        if self.top_n == 0 {
            return Err(PulseError::Config("top_n must be at least 1".into()));
        }
        if !self.spike_threshold.is_finite() {
            return Err(PulseError::Config(
                "spike_threshold must be a finite number".into(),
            ));
        }
        if !self.delimiter.is_ascii() {
            return Err(PulseError::Config(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.min_cell_days, 2);
        assert_eq!(settings.top_n, 15);
        assert_eq!(settings.score_by, ScoreBy::Residual);
        assert_eq!(settings.report_path, PathBuf::from("reports/insights.md"));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PulsePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.top_n = 25;
        settings.score_by = ScoreBy::Revenue;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.top_n, 25);
        assert_eq!(loaded.score_by, ScoreBy::Revenue);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PulsePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"top_n": 5}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.top_n, 5);
        assert_eq!(loaded.min_cell_days, 2);
        assert_eq!(loaded.delimiter, ',');
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PulsePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"min_cell_days": 0}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, PulseError::Config(_)));
    }
}
