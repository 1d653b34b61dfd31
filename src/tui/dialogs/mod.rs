//! Popups drawn over the active tab

pub mod help;
