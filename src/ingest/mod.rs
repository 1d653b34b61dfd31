//! Input loading for Retail Pulse
//!
//! Reads the retail sales CSV, normalises its header names, maps the
//! required columns and parses every row into a [`Transaction`].
//!
//! [`Transaction`]: crate::models::Transaction

pub mod dataset;
pub mod loader;
pub mod mapping;

pub use dataset::Dataset;
pub use loader::CsvLoader;
pub use mapping::{to_snake_case, ColumnMapping, REQUIRED_COLUMNS};

use std::io::Read;
use std::path::Path;

use crate::error::PulseResult;

/// Load a retail sales CSV with default loader options
pub fn load_retail_csv(path: impl AsRef<Path>) -> PulseResult<Dataset> {
    CsvLoader::new().load_path(path)
}

/// Load retail sales CSV data from any reader with default loader options
pub fn load_from_reader<R: Read>(reader: R) -> PulseResult<Dataset> {
    CsvLoader::new().load_reader(reader, "<reader>")
}
