//! Domain models for IPv4 ranges.
//!
//! This module contains the value types and conversions used throughout the application:
//! - [`Ipv4`] - IPv4 address with CIDR notation support
//! - [`IpRange`] - inclusive `[start, end]` address range
//! - address/CIDR parsing helpers

mod ipv4;
mod range;

// Re-export public types
pub use ipv4::{
    broadcast_addr, cut_addr, format_address, get_cidr_mask, lo_mask, parse_address, parse_cidr,
    Ipv4, MAX_LENGTH,
};
pub use range::IpRange;
