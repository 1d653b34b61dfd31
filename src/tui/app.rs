//! Application state for the dashboard
//!
//! The App struct holds the pipeline, its latest results and all state
//! needed for rendering and handling events.

use std::ops::RangeInclusive;

use crate::analysis::SpikeCard;
use crate::error::PulseResult;
use crate::models::ScoredDay;
use crate::pipeline::{Analysis, Pipeline, RunSummary};

/// Range the dashboard keeps top-n in
pub const DASHBOARD_TOP_N: RangeInclusive<usize> = 5..=50;

/// Step used by `+` and `-`
pub const TOP_N_STEP: usize = 5;

/// Which tab is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveTab {
    #[default]
    Overview,
    Seasonality,
    Spikes,
    Quality,
    Report,
}

impl ActiveTab {
    pub const ALL: [ActiveTab; 5] = [
        ActiveTab::Overview,
        ActiveTab::Seasonality,
        ActiveTab::Spikes,
        ActiveTab::Quality,
        ActiveTab::Report,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Seasonality => "Seasonality",
            Self::Spikes => "Spike Explorer",
            Self::Quality => "Data Quality",
            Self::Report => "Report",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    /// Tab for a zero-based index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Main application state
pub struct App {
    pipeline: Pipeline,

    /// Results currently on screen
    pub analysis: Analysis,

    /// Rendered Markdown report of `analysis`
    pub report_text: String,

    /// Outputs of the last `r` run, if any
    pub last_run: Option<RunSummary>,

    pub active_tab: ActiveTab,

    /// Index into `analysis.spikes`
    pub selected_spike: usize,

    /// First visible line of the report tab
    pub report_scroll: u16,

    pub show_help: bool,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: Option<String>,
}

impl App {
    /// Create the app around an already analyzed dataset
    pub fn new(pipeline: Pipeline, analysis: Analysis) -> Self {
        let report_text = analysis
            .report(&pipeline.options().currency_symbol)
            .format_markdown();
        Self {
            pipeline,
            analysis,
            report_text,
            last_run: None,
            active_tab: ActiveTab::default(),
            selected_spike: 0,
            report_scroll: 0,
            show_help: false,
            should_quit: false,
            status_message: None,
        }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn top_n(&self) -> usize {
        self.pipeline.options().top_n
    }

    pub fn currency_symbol(&self) -> &str {
        &self.pipeline.options().currency_symbol
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn select_tab(&mut self, tab: ActiveTab) {
        self.active_tab = tab;
    }

    pub fn next_tab(&mut self) {
        self.active_tab = self.active_tab.next();
    }

    pub fn prev_tab(&mut self) {
        self.active_tab = self.active_tab.prev();
    }

    /// Move down in the current tab
    pub fn move_down(&mut self) {
        match self.active_tab {
            ActiveTab::Spikes => {
                if self.selected_spike + 1 < self.analysis.spikes.len() {
                    self.selected_spike += 1;
                }
            }
            ActiveTab::Report => self.scroll_report(1),
            _ => {}
        }
    }

    /// Move up in the current tab
    pub fn move_up(&mut self) {
        match self.active_tab {
            ActiveTab::Spikes => self.selected_spike = self.selected_spike.saturating_sub(1),
            ActiveTab::Report => self.scroll_report(-1),
            _ => {}
        }
    }

    /// Scroll the report, clamped to its length
    pub fn scroll_report(&mut self, lines: i32) {
        let max = self.report_text.lines().count().saturating_sub(1);
        let next = (self.report_scroll as i64 + lines as i64).clamp(0, max as i64);
        self.report_scroll = u16::try_from(next).unwrap_or(u16::MAX);
    }

    pub fn selected_spike_day(&self) -> Option<&ScoredDay> {
        self.analysis.spikes.get(self.selected_spike)
    }

    /// Card of the selected spike day; cards follow the spike ranking
    pub fn selected_card(&self) -> Option<&SpikeCard> {
        self.analysis.cards.get(self.selected_spike)
    }

    pub fn increase_top_n(&mut self) {
        let next = (self.top_n() + TOP_N_STEP).min(*DASHBOARD_TOP_N.end());
        self.change_top_n(next);
    }

    pub fn decrease_top_n(&mut self) {
        let next = self
            .top_n()
            .saturating_sub(TOP_N_STEP)
            .max(*DASHBOARD_TOP_N.start());
        self.change_top_n(next);
    }

    fn change_top_n(&mut self, top_n: usize) {
        let top_n = top_n.clamp(*DASHBOARD_TOP_N.start(), *DASHBOARD_TOP_N.end());
        if top_n == self.top_n() {
            return;
        }
        let result = self
            .pipeline
            .set_top_n(top_n)
            .and_then(|()| self.pipeline.analyze(self.analysis.dataset.clone()));
        match result {
            Ok(analysis) => {
                self.replace_analysis(analysis);
                self.set_status(format!("Top-n set to {}", top_n));
            }
            Err(e) => self.set_status(format!("Error: {}", e)),
        }
    }

    /// Reload the input, re-run the pipeline and write every output
    pub fn rerun(&mut self) -> PulseResult<()> {
        let (analysis, summary) = self.pipeline.run()?;
        self.replace_analysis(analysis);
        self.set_status(format!(
            "Outputs written to {} ({} spike days)",
            summary.out_dir.display(),
            summary.n_spikes
        ));
        self.last_run = Some(summary);
        Ok(())
    }

    fn replace_analysis(&mut self, analysis: Analysis) {
        self.report_text = analysis
            .report(&self.pipeline.options().currency_symbol)
            .format_markdown();
        self.analysis = analysis;
        self.selected_spike = self
            .selected_spike
            .min(self.analysis.spikes.len().saturating_sub(1));
        self.scroll_report(0);
    }
}
