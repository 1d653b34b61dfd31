//! Reports module for Retail Pulse
//!
//! Provides the dataset profile and the Markdown insights report written
//! at the end of a pipeline run.

pub mod insights;
pub mod profile;

pub use insights::InsightsReport;
pub use profile::DatasetProfile;
