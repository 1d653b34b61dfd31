//! Path management for Retail Pulse
//!
//! Resolves where settings and log files live.
//!
//! ## Path Resolution Order
//!
//! 1. `RETAIL_PULSE_HOME` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (e.g. `~/.config/retail-pulse` on Linux)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::PulseError;

/// Environment variable that overrides the base directory
pub const HOME_ENV_VAR: &str = "RETAIL_PULSE_HOME";

/// Manages all paths used by Retail Pulse
#[derive(Debug, Clone)]
pub struct PulsePaths {
    /// Base directory for settings and logs
    base_dir: PathBuf,
}

impl PulsePaths {
    /// Create a new PulsePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and the
    /// override variable is not set.
    pub fn new() -> Result<Self, PulseError> {
        let base_dir = if let Ok(custom) = std::env::var(HOME_ENV_VAR) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create PulsePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the log file used while the dashboard owns the terminal
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("pulse.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), PulseError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PulseError::Io(format!("Failed to create base directory: {}", e)))
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, PulseError> {
    ProjectDirs::from("", "", "retail-pulse")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            PulseError::Config(format!(
                "Could not determine a config directory; set {}",
                HOME_ENV_VAR
            ))
        })
}
