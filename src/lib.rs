//! Track IPv4 ranges given as CIDR blocks and answer membership queries.
//!
//! - [`models`] - address and CIDR conversions, [`models::IpRange`]
//! - [`processing`] - the merged, sorted [`processing::RangeSet`]
//! - [`api`] - HTTP service around a shared collection
//! - [`client`] - HTTP client for that service
//! - [`output`] - terminal rendering of range snapshots

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;

pub use error::RangeError;
pub use models::{format_address, parse_address, parse_cidr, IpRange};
pub use processing::{RangeSet, RangeSnapshot};
