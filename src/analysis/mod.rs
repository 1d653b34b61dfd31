//! Analysis stages
//!
//! Each submodule is one step of the pipeline, working on plain slices of
//! model rows:
//!
//! - `quality`: sanity counts and the total = quantity x price identity
//! - `aggregate`: daily, weekly and daily-category metrics
//! - `seasonality`: weekday, month and month x weekday summaries
//! - `baseline`: hierarchical seasonal expectation of daily revenue
//! - `spikes`: robust z-scores and spike ranking
//! - `explain`: spike cards attributing spikes to drivers and categories

pub mod aggregate;
pub mod baseline;
pub mod explain;
pub mod quality;
pub mod seasonality;
pub mod spikes;
pub mod stats;

pub use aggregate::{daily_category_mix, daily_metrics, weekly_metrics};
pub use baseline::{expected_revenue_month_dow, Baseline, DEFAULT_MIN_CELL_DAYS};
pub use explain::{build_spike_cards, card_for_date, driver_deltas, DriverDelta, SpikeCard};
pub use quality::{basic_sanity_checks, check_total_amount_identity, IdentityCheck, QualitySummary};
pub use seasonality::{
    dow_summary, month_dow_heatmap, month_summary, DowSummary, Heatmap, MonthSummary,
};
pub use spikes::{
    add_spike_scores, flag_spikes, robust_zscore, top_spike_days, ScoreBy, DEFAULT_SPIKE_THRESHOLD,
};
