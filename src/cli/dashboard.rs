//! `pulse dashboard`: interactive terminal dashboard

use clap::Args;
use tracing::debug;

use super::{run_options, InputArgs, ModelArgs};
use crate::config::Settings;
use crate::pipeline::Pipeline;
use crate::tui::app::DASHBOARD_TOP_N;
use crate::tui::run_dashboard;

#[derive(Args, Debug, Clone)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Initial number of spike days (5 to 50)
    #[arg(short = 'n', long)]
    pub top_n: Option<usize>,
}

/// Handle `pulse dashboard`
pub fn handle_dashboard_command(settings: &Settings, args: DashboardArgs) -> anyhow::Result<()> {
    let mut options = run_options(settings, &args.input, &args.model);
    let requested = args.top_n.unwrap_or(options.top_n);
    options.top_n = requested.clamp(*DASHBOARD_TOP_N.start(), *DASHBOARD_TOP_N.end());
    if options.top_n != requested {
        debug!(requested, top_n = options.top_n, "clamped dashboard top-n");
    }

    run_dashboard(Pipeline::new(options)?)
}
