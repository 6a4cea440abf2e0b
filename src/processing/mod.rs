//! Range collection logic.
//!
//! This module contains the business logic for tracking IPv4 ranges:
//! - [`range_set`] - the sorted, merged range collection
//! - [`loader`] - bulk loading of CIDR lists

mod loader;
mod range_set;

// Re-export public types and functions
pub use loader::{load_cidr_file, load_cidrs, LoadReport};
pub use range_set::{RangeSet, RangeSnapshot};
