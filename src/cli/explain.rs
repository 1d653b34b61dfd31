//! `pulse explain`: spike card for one date

use chrono::NaiveDate;
use clap::Args;

use super::{run_options, InputArgs, ModelArgs};
use crate::analysis::{card_for_date, driver_deltas};
use crate::config::Settings;
use crate::display::tables::{card_summary, drivers_table};
use crate::display::{format_amount, format_percentage, render, TableStyle};
use crate::error::{PulseError, PulseResult};
use crate::export::export_json;
use crate::pipeline::Pipeline;

#[derive(Args, Debug, Clone)]
pub struct ExplainArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Date to explain (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: String,

    /// Print the spike card as JSON
    #[arg(long)]
    pub json: bool,
}

/// Handle `pulse explain`
pub fn handle_explain_command(settings: &Settings, args: ExplainArgs) -> PulseResult<()> {
    let date = NaiveDate::parse_from_str(args.date.trim(), "%Y-%m-%d").map_err(|_| {
        PulseError::Validation(format!(
            "Invalid date format: {}. Use YYYY-MM-DD",
            args.date
        ))
    })?;

    let options = run_options(settings, &args.input, &args.model);
    let by = options.score_by;
    let pipeline = Pipeline::new(options)?;
    let analysis = pipeline.analyze(pipeline.load()?)?;

    let card = card_for_date(&analysis.scored, &analysis.mix, date, by)?;
    if args.json {
        export_json(&card, &mut std::io::stdout().lock())?;
        return Ok(());
    }

    let symbol = &settings.currency_symbol;
    println!("{}", render(card_summary(&card, symbol), TableStyle::Terminal));
    println!();
    println!("Drivers vs mean over all days");
    println!("{}", render(drivers_table(&driver_deltas(&card)), TableStyle::Terminal));

    let mix = analysis.day_mix(date);
    if !mix.is_empty() {
        println!();
        println!("Category contribution");
        for row in mix {
            println!(
                "  {:<20} {:>14} {:>6}",
                row.product_category,
                format_amount(row.category_revenue.as_f64(), symbol),
                format_percentage(row.category_share * 100.0)
            );
        }
    }

    if let Some(rank) = analysis.spikes.iter().position(|d| d.date == date) {
        println!();
        println!("Rank {} of the top {} spike days.", rank + 1, analysis.spikes.len());
    }

    Ok(())
}
