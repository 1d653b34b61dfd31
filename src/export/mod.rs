//! Export module for Retail Pulse
//!
//! Writes the pipeline results to disk:
//! - CSV: daily, weekly, category mix, scored days and spike days
//! - JSON: spike cards and the quality summary (machine-readable)
//! - YAML: the same documents in a human-readable form

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_rows_csv, export_rows_to_file, export_spike_days_csv, SpikeDayRow};
pub use json::export_json;
pub use yaml::export_yaml;

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{PulseError, PulseResult};

/// Format of the document outputs (spike cards, quality summary)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
}

impl ExportFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    /// Serialize a document in this format
    pub fn write<T: Serialize, W: Write>(&self, value: &T, writer: &mut W) -> PulseResult<()> {
        match self {
            Self::Json => export_json(value, writer),
            Self::Yaml => export_yaml(value, writer),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Names of every file the pipeline writes under the output directory
#[derive(Debug, Clone)]
pub struct OutputPaths {
    out_dir: PathBuf,
    format: ExportFormat,
}

impl OutputPaths {
    pub fn new(out_dir: impl Into<PathBuf>, format: ExportFormat) -> Self {
        Self {
            out_dir: out_dir.into(),
            format,
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn daily_metrics(&self) -> PathBuf {
        self.out_dir.join("daily_metrics.csv")
    }

    pub fn weekly_metrics(&self) -> PathBuf {
        self.out_dir.join("weekly_metrics.csv")
    }

    pub fn category_mix(&self) -> PathBuf {
        self.out_dir.join("daily_category_mix.csv")
    }

    pub fn daily_scored(&self) -> PathBuf {
        self.out_dir.join("daily_scored.csv")
    }

    pub fn spike_days(&self) -> PathBuf {
        self.out_dir.join("spike_days.csv")
    }

    pub fn spike_cards(&self) -> PathBuf {
        self.out_dir
            .join(format!("spike_cards.{}", self.format.extension()))
    }

    pub fn quality_summary(&self) -> PathBuf {
        self.out_dir
            .join(format!("quality_summary.{}", self.format.extension()))
    }

    /// Every output file, in the order the pipeline writes them
    pub fn all(&self) -> Vec<PathBuf> {
        vec![
            self.daily_metrics(),
            self.weekly_metrics(),
            self.category_mix(),
            self.daily_scored(),
            self.spike_days(),
            self.spike_cards(),
            self.quality_summary(),
        ]
    }

    /// Create the output directory
    pub fn ensure_dir(&self) -> PulseResult<()> {
        fs::create_dir_all(&self.out_dir).map_err(|e| {
            PulseError::Io(format!(
                "Failed to create output directory {}: {}",
                self.out_dir.display(),
                e
            ))
        })
    }
}

/// Open a buffered writer for an output file, creating parent directories
pub fn create_output_file(path: &Path) -> PulseResult<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)
        .map_err(|e| PulseError::Export(format!("Failed to create {}: {}", path.display(), e)))?;
    Ok(BufWriter::new(file))
}

/// Write a serializable document to `path` in the given format
pub fn write_document<T: Serialize>(
    value: &T,
    path: &Path,
    format: ExportFormat,
) -> PulseResult<()> {
    let mut writer = create_output_file(path)?;
    format.write(value, &mut writer)?;
    writer
        .flush()
        .map_err(|e| PulseError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_paths() {
        let paths = OutputPaths::new("out", ExportFormat::Json);
        assert_eq!(paths.daily_metrics(), PathBuf::from("out/daily_metrics.csv"));
        assert_eq!(paths.spike_cards(), PathBuf::from("out/spike_cards.json"));
        assert_eq!(paths.all().len(), 7);

        let yaml = OutputPaths::new("out", ExportFormat::Yaml);
        assert_eq!(yaml.quality_summary(), PathBuf::from("out/quality_summary.yaml"));
    }

    #[test]
    fn test_write_document_creates_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("doc.json");

        write_document(&vec![1, 2, 3], &path, ExportFormat::Json).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let parsed: Vec<i32> = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, vec![1, 2, 3]);
    }

    #[test]
    fn test_format_from_settings_json() {
        let format: ExportFormat = serde_json::from_str("\"yaml\"").unwrap();
        assert_eq!(format, ExportFormat::Yaml);
        assert_eq!(ExportFormat::default().to_string(), "json");
    }
}
