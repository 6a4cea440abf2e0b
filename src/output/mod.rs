//! Output formatting for range data.
//!
//! This module handles rendering range snapshots for the terminal:
//! - [`table`] - range table and text timeline
//! - [`terminal`] - field formatting helpers

mod table;
mod terminal;

pub use table::{format_range_rows, print_ranges, render_timeline};
pub use terminal::{format_count, format_field};
