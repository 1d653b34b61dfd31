use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use pulse::cli::{
    handle_dashboard_command, handle_explain_command, handle_quality_command, handle_run_command,
    handle_seasonality_command, handle_spikes_command, DashboardArgs, ExplainArgs, QualityArgs,
    RunArgs, SeasonalityArgs, SpikesArgs,
};
use pulse::config::{PulsePaths, Settings};
use pulse::logging::{init_logging, LogTarget};

#[derive(Parser)]
#[command(
    name = "pulse",
    version,
    about = "Retail calendar pattern finder",
    long_about = "Retail Pulse reads a retail sales CSV and finds its calendar patterns: \
                  day-of-week and monthly seasonality, spike days that beat their \
                  seasonal expectation, and what drove each spike."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write outputs and the report
    Run(RunArgs),

    /// Check the input for missing values, non-positive amounts and total mismatches
    Quality(QualityArgs),

    /// Show day-of-week, monthly or month x weekday seasonality
    Seasonality(SeasonalityArgs),

    /// Rank spike days by robust z-score
    Spikes(SpikesArgs),

    /// Explain one date with a spike card
    Explain(ExplainArgs),

    /// Launch the interactive dashboard
    #[command(alias = "ui")]
    Dashboard(DashboardArgs),

    /// Write the default settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = PulsePaths::new()?;

    // The dashboard owns the terminal, so its logs go to a file
    let target = match cli.command {
        Some(Commands::Dashboard(_)) => LogTarget::File(paths.log_file()),
        _ => LogTarget::Stderr,
    };
    init_logging(cli.verbose, &target)?;

    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Run(args)) => handle_run_command(&settings, args)?,
        Some(Commands::Quality(args)) => handle_quality_command(&settings, args)?,
        Some(Commands::Seasonality(args)) => handle_seasonality_command(&settings, args)?,
        Some(Commands::Spikes(args)) => handle_spikes_command(&settings, args)?,
        Some(Commands::Explain(args)) => handle_explain_command(&settings, args)?,
        Some(Commands::Dashboard(args)) => handle_dashboard_command(&settings, args)?,
        Some(Commands::Init) => {
            println!("Initializing Retail Pulse at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Settings written to {}", paths.settings_file().display());
            println!();
            println!("Run 'pulse run --input <csv>' to analyze a sales file.");
        }
        Some(Commands::Config) => {
            println!("Retail Pulse Configuration");
            println!("==========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!(
                "Settings file:  {}{}",
                paths.settings_file().display(),
                if paths.is_initialized() { "" } else { " (not written, using defaults)" }
            );
            println!("Log file:       {}", paths.log_file().display());
            println!();
            println!("Settings:");
            println!("  Min cell days:   {}", settings.min_cell_days);
            println!("  Top-n:           {}", settings.top_n);
            println!("  Score by:        {}", settings.score_by);
            println!("  Spike threshold: {}", settings.spike_threshold);
            println!("  Date format:     {}", settings.date_format);
            println!("  Delimiter:       {:?}", settings.delimiter);
            println!("  Currency:        {}", settings.currency_symbol);
            println!("  Output dir:      {}", settings.output_dir.display());
            println!("  Report path:     {}", settings.report_path.display());
            println!("  Export format:   {}", settings.export_format);
        }
        None => {
            println!("Retail Pulse - retail calendar pattern finder");
            println!();
            println!("Run 'pulse --help' for usage information.");
            println!("Run 'pulse run --input <csv>' to analyze a sales file.");
        }
    }

    Ok(())
}
