//! YAML Export functionality
//!
//! Human-readable alternative to the JSON documents, with a short header
//! comment naming the generator.

use std::io::Write;

use serde::Serialize;

use crate::error::{PulseError, PulseResult};

/// Write a value as YAML preceded by a header comment
pub fn export_yaml<T: Serialize, W: Write>(value: &T, writer: &mut W) -> PulseResult<()> {
    writeln!(
        writer,
        "# Generated by Retail Pulse {}",
        env!("CARGO_PKG_VERSION")
    )
    .map_err(|e| PulseError::Export(e.to_string()))?;

    serde_yaml::to_writer(&mut *writer, value).map_err(|e| PulseError::Export(e.to_string()))?;
    Ok(())
}
