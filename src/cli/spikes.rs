//! `pulse spikes`: ranked spike days

use clap::Args;

use super::{run_options, InputArgs, ModelArgs};
use crate::config::Settings;
use crate::display::tables::spikes_table;
use crate::display::{render, TableStyle};
use crate::error::PulseResult;
use crate::pipeline::Pipeline;

#[derive(Args, Debug, Clone)]
pub struct SpikesArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Number of days to list
    #[arg(short = 'n', long)]
    pub top_n: Option<usize>,

    /// List every day whose score reaches this value instead of the top N
    #[arg(long)]
    pub threshold: Option<f64>,
}

/// Handle `pulse spikes`
pub fn handle_spikes_command(settings: &Settings, args: SpikesArgs) -> PulseResult<()> {
    let mut options = run_options(settings, &args.input, &args.model);
    if let Some(top_n) = args.top_n {
        options.top_n = top_n;
    }
    if let Some(threshold) = args.threshold {
        options.spike_threshold = threshold;
    }
    let by = options.score_by;
    let threshold = options.spike_threshold;

    let pipeline = Pipeline::new(options)?;
    let analysis = pipeline.analyze(pipeline.load()?)?;

    let (title, days) = match args.threshold {
        Some(_) => (
            format!("Days with {} score >= {}", by.column(), threshold),
            &analysis.flagged,
        ),
        None => (
            format!("Top {} spike days (ranked by {})", analysis.spikes.len(), by.column()),
            &analysis.spikes,
        ),
    };

    println!("{}", title);
    if days.is_empty() {
        println!("No spike days found.");
        return Ok(());
    }
    println!(
        "{}",
        render(spikes_table(days, &settings.currency_symbol), TableStyle::Terminal)
    );

    Ok(())
}
