//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the pipeline.

pub mod dashboard;
pub mod explain;
pub mod quality;
pub mod run;
pub mod seasonality;
pub mod spikes;

pub use dashboard::{handle_dashboard_command, DashboardArgs};
pub use explain::{handle_explain_command, ExplainArgs};
pub use quality::{handle_quality_command, QualityArgs};
pub use run::{handle_run_command, RunArgs};
pub use seasonality::{handle_seasonality_command, SeasonalityArgs, SeasonalityView};
pub use spikes::{handle_spikes_command, SpikesArgs};

use std::path::PathBuf;

use clap::Args;

use crate::analysis::ScoreBy;
use crate::config::Settings;
use crate::pipeline::RunOptions;

/// Input file options shared by every analysis command
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Path to the retail sales CSV
    #[arg(short, long, env = "RETAIL_PULSE_INPUT")]
    pub input: PathBuf,

    /// Preferred format of the Date column (strftime, e.g. %d/%m/%Y)
    #[arg(long)]
    pub date_format: Option<String>,

    /// Field delimiter of the input CSV
    #[arg(long)]
    pub delimiter: Option<char>,
}

/// Baseline and scoring options
#[derive(Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// Minimum days a (month, weekday) cell needs before its mean is used
    #[arg(long)]
    pub min_cell_days: Option<usize>,

    /// Score used to rank spike days
    #[arg(long, value_enum)]
    pub score_by: Option<ScoreBy>,
}

/// Pipeline options from settings with command-line overrides applied
pub fn run_options(settings: &Settings, input: &InputArgs, model: &ModelArgs) -> RunOptions {
    let mut options = RunOptions::from_settings(&input.input, settings);
    if let Some(format) = &input.date_format {
        options.date_format = format.clone();
    }
    if let Some(delimiter) = input.delimiter {
        options.delimiter = delimiter;
    }
    if let Some(min_cell_days) = model.min_cell_days {
        options.min_cell_days = min_cell_days;
    }
    if let Some(score_by) = model.score_by {
        options.score_by = score_by;
    }
    options
}
