//! `pulse quality`: data quality checks

use clap::Args;

use super::{run_options, InputArgs, ModelArgs};
use crate::analysis::{basic_sanity_checks, check_total_amount_identity};
use crate::config::Settings;
use crate::display::tables::quality_table;
use crate::display::{format_amount, render, TableStyle};
use crate::error::PulseResult;
use crate::export::export_json;
use crate::pipeline::Pipeline;

#[derive(Args, Debug, Clone)]
pub struct QualityArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// List up to this many rows where total != quantity x price
    #[arg(long, default_value_t = 0)]
    pub show_mismatches: usize,
}

/// Handle `pulse quality`
pub fn handle_quality_command(settings: &Settings, args: QualityArgs) -> PulseResult<()> {
    let options = run_options(settings, &args.input, &ModelArgs::default());
    let dataset = Pipeline::new(options)?.load()?;

    let identity = check_total_amount_identity(&dataset);
    let summary = basic_sanity_checks(&dataset).with_mismatches(&identity);

    if args.json {
        export_json(&summary, &mut std::io::stdout().lock())?;
        return Ok(());
    }

    println!("Data quality: {}", dataset.source);
    println!("{}", render(quality_table(&summary), TableStyle::Terminal));

    if summary.is_clean() {
        println!("No issues found.");
    }

    let symbol = &settings.currency_symbol;
    let mismatches: Vec<_> = identity.iter().filter(|c| c.is_mismatch).collect();
    if args.show_mismatches > 0 && !mismatches.is_empty() {
        println!();
        println!("Rows where total != quantity x price:");
        for check in mismatches.iter().take(args.show_mismatches) {
            let fmt = |m: Option<crate::models::Money>| {
                m.map(|m| format_amount(m.as_f64(), symbol))
                    .unwrap_or_else(|| "-".to_string())
            };
            println!(
                "  {} {:>8}  total {}  expected {}  off by {}",
                check.date,
                check.transaction_id,
                fmt(check.total_amount),
                fmt(check.expected_total),
                fmt(check.abs_error)
            );
        }
        if mismatches.len() > args.show_mismatches {
            println!("  ... and {} more", mismatches.len() - args.show_mismatches);
        }
    }

    Ok(())
}
