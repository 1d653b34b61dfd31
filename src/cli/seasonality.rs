//! `pulse seasonality`: weekday, month and heatmap summaries

use clap::{Args, ValueEnum};

use super::{run_options, InputArgs, ModelArgs};
use crate::analysis::{daily_metrics, dow_summary, month_dow_heatmap, month_summary};
use crate::config::Settings;
use crate::display::tables::{dow_table, heatmap_table, month_table};
use crate::display::{format_amount, format_bar, render, TableStyle};
use crate::error::PulseResult;
use crate::pipeline::Pipeline;

const BAR_WIDTH: usize = 30;

/// Which seasonality summary to print
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SeasonalityView {
    #[default]
    Dow,
    Month,
    Heatmap,
}

#[derive(Args, Debug, Clone)]
pub struct SeasonalityArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Summary to show
    #[arg(long, value_enum, default_value_t = SeasonalityView::Dow)]
    pub by: SeasonalityView,
}

/// Handle `pulse seasonality`
pub fn handle_seasonality_command(settings: &Settings, args: SeasonalityArgs) -> PulseResult<()> {
    let options = run_options(settings, &args.input, &ModelArgs::default());
    let dataset = Pipeline::new(options)?.load()?;
    let daily = daily_metrics(&dataset);
    let symbol = &settings.currency_symbol;

    match args.by {
        SeasonalityView::Dow => {
            let summary = dow_summary(&daily);
            println!("Day-of-week patterns");
            println!("{}", render(dow_table(&summary, symbol), TableStyle::Terminal));

            let max = summary.iter().map(|d| d.avg_daily_revenue).fold(0.0, f64::max);
            for day in &summary {
                println!(
                    "{:<9} {} {}",
                    day.dow.name(),
                    format_bar(day.avg_daily_revenue, max, BAR_WIDTH),
                    format_amount(day.avg_daily_revenue, symbol)
                );
            }
        }
        SeasonalityView::Month => {
            let summary = month_summary(&daily);
            println!("Monthly patterns (observed transaction-days only)");
            println!("{}", render(month_table(&summary, symbol), TableStyle::Terminal));

            let max = summary
                .iter()
                .map(|m| m.revenue.as_f64())
                .fold(0.0, f64::max);
            for month in &summary {
                println!(
                    "{} {} {}",
                    month.month,
                    format_bar(month.revenue.as_f64(), max, BAR_WIDTH),
                    month.revenue.format_with_symbol(symbol)
                );
            }
        }
        SeasonalityView::Heatmap => {
            let heatmap = month_dow_heatmap(&daily);
            println!("Month x day-of-week (average daily revenue)");
            println!("{}", render(heatmap_table(&heatmap), TableStyle::Terminal));
        }
    }

    Ok(())
}
