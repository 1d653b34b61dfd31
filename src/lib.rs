//! Retail Pulse - retail calendar pattern finder
//!
//! This library reads retail sales transactions and finds their calendar
//! patterns: day-of-week and monthly seasonality, days whose revenue beats
//! a seasonal baseline, and the drivers behind each of those spike days.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, calendar keys, transactions, daily rows)
//! - `ingest`: CSV loading with header mapping and date parsing
//! - `analysis`: Aggregation, quality checks, seasonality, baseline, spikes, spike cards
//! - `export`: CSV, JSON and YAML writers
//! - `reports`: Dataset profile and the Markdown insights report
//! - `display`: Terminal tables and text charts
//! - `pipeline`: End-to-end run over one input file
//! - `cli`: Command handlers for the `pulse` binary
//! - `tui`: Interactive dashboard
//! - `logging`: Subscriber setup for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use pulse::pipeline::{Pipeline, RunOptions};
//!
//! let pipeline = Pipeline::new(RunOptions::new("retail_sales_dataset.csv"))?;
//! let (analysis, summary) = pipeline.run()?;
//! println!("{} spike days written to {}", summary.n_spikes, summary.out_dir.display());
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ingest;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod reports;
pub mod tui;

pub use error::{PulseError, PulseResult};
