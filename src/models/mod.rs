//! Core data models for Retail Pulse
//!
//! This module contains the data structures of the retail analytics domain:
//! money amounts, calendar keys, input transactions and aggregated rows.

pub mod calendar;
pub mod metrics;
pub mod money;
pub mod transaction;

pub use calendar::{CalendarFields, DayOfWeek, MonthKey, WeekKey};
pub use metrics::{BaselineLevel, CategoryMixRow, DailyMetrics, ScoredDay, WeeklyMetrics};
pub use money::Money;
pub use transaction::Transaction;
