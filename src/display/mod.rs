//! Display formatting for terminal output
//!
//! Number formatting, text charts and `tabled` tables used by the CLI and
//! the Markdown report.

pub mod report;
pub mod tables;

pub use report::{
    format_amount, format_bar, format_percentage, format_signed, format_signed_bar, shade,
    sparkline, truncate,
};
pub use tables::{render, TableStyle};
