//! Terminal dashboard
//!
//! A ratatui dashboard over one pipeline run: overview, seasonality, spike
//! explorer, data quality and the Markdown report, with keys to change
//! top-n and re-run the pipeline.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

pub mod views;

pub mod dialogs;

pub mod layout;

pub use app::App;
pub use terminal::run_dashboard;
