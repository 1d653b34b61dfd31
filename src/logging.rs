//! Logging setup for the `pulse` binary
//!
//! Library code only emits `tracing` events. The binary installs a
//! subscriber here: stderr for ordinary commands, a log file while the
//! dashboard owns the terminal.

use std::fs::{self, File};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where log records are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Default filter directive for a `-v` count
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// `RUST_LOG` when set, otherwise the level implied by `-v`
fn make_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)))
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create log directory '{}'", parent.display()))?;
    }
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))
}

/// Install the global subscriber. Call once at startup.
///
/// A second call keeps the first subscriber and returns `Ok`.
pub fn init_logging(verbosity: u8, target: &LogTarget) -> Result<()> {
    let registry = tracing_subscriber::registry().with(make_filter(verbosity));

    let installed = match target {
        LogTarget::Stderr => registry
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_ansi(io::stderr().is_terminal())
                    .with_target(false),
            )
            .try_init(),
        LogTarget::File(path) => registry
            .with(
                fmt::layer()
                    .with_writer(Mutex::new(open_log_file(path)?))
                    .with_ansi(false),
            )
            .try_init(),
    };

    if let Err(err) = installed {
        // Another subscriber is already global (tests, repeated calls); keep it
        tracing::debug!(%err, "log subscriber not replaced");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for_verbosity(0), "warn");
        assert_eq!(level_for_verbosity(1), "info");
        assert_eq!(level_for_verbosity(2), "debug");
        assert_eq!(level_for_verbosity(9), "trace");
    }

    #[test]
    fn test_repeated_init_keeps_first_subscriber() {
        init_logging(0, &LogTarget::Stderr).unwrap();
        init_logging(2, &LogTarget::Stderr).unwrap();
    }

    #[test]
    fn test_open_log_file_creates_directory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("logs").join("pulse.log");

        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
