//! Configuration module for Retail Pulse
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence
//! - Analysis defaults (baseline cell size, top-N, spike threshold)

pub mod paths;
pub mod settings;

pub use paths::PulsePaths;
pub use settings::Settings;
