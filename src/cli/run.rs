//! `pulse run`: full pipeline with outputs and report

use std::path::PathBuf;

use clap::Args;

use super::{run_options, InputArgs, ModelArgs};
use crate::config::Settings;
use crate::error::PulseResult;
use crate::export::ExportFormat;
use crate::pipeline::Pipeline;

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Output directory for CSV/JSON artifacts
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Path of the Markdown report
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// Number of spike days to export
    #[arg(short = 'n', long)]
    pub top_n: Option<usize>,

    /// Robust z-score at or above which a day counts as a spike
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Format of spike cards and the quality summary
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,
}

/// Handle `pulse run`
pub fn handle_run_command(settings: &Settings, args: RunArgs) -> PulseResult<()> {
    let mut options = run_options(settings, &args.input, &args.model);
    if let Some(out) = args.out {
        options.out_dir = out;
    }
    if let Some(report) = args.report {
        options.report_path = report;
    }
    if let Some(top_n) = args.top_n {
        options.top_n = top_n;
    }
    if let Some(threshold) = args.threshold {
        options.spike_threshold = threshold;
    }
    if let Some(format) = args.format {
        options.export_format = format;
    }

    let (analysis, summary) = Pipeline::new(options)?.run()?;

    println!();
    println!("Done! Project outputs created.");
    println!("Outputs folder: {}", summary.out_dir.display());
    println!("Report: {}", summary.report_path.display());
    println!("Spike days exported: {}", summary.n_spikes);
    if !analysis.flagged.is_empty() {
        println!(
            "Days at or above the spike threshold: {}",
            analysis.flagged.len()
        );
    }
    println!();

    Ok(())
}
