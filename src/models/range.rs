//! Inclusive IPv4 address range.

use super::ipv4::{format_address, lo_mask, Ipv4, MAX_LENGTH};
use crate::error::RangeError;
use std::fmt;
use std::net::Ipv4Addr;

/// An inclusive `[start, end]` range of IPv4 addresses, `start <= end`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IpRange {
    pub(crate) start: u32,
    pub(crate) end: u32,
}

impl IpRange {
    /// Build a range from explicit bounds.
    pub fn new(start: u32, end: u32) -> Result<IpRange, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(IpRange { start, end })
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Number of addresses covered; `/0` covers 2^32 so this is a `u64`.
    pub fn size(&self) -> u64 {
        u64::from(self.end) - u64::from(self.start) + 1
    }

    pub fn contains(&self, addr: u32) -> bool {
        self.start <= addr && addr <= self.end
    }

    /// True when the two ranges overlap or sit directly next to each other.
    pub fn touches(&self, other: &IpRange) -> bool {
        u64::from(other.start) <= u64::from(self.end) + 1
            && u64::from(self.start) <= u64::from(other.end) + 1
    }

    /// Smallest list of aligned CIDR blocks that exactly covers this range.
    pub fn to_cidrs(&self) -> Vec<Ipv4> {
        let mut cidrs = Vec::new();
        let end = u64::from(self.end);
        let mut next = u64::from(self.start);

        while next <= end {
            // Biggest block aligned at `next` that does not run past `end`.
            let mut mask = lo_mask(Ipv4Addr::from(next as u32));
            while next + (1u64 << (MAX_LENGTH - mask)) - 1 > end {
                mask += 1;
            }
            assert!(
                mask <= MAX_LENGTH,
                "mask[{mask}] > 32 should never happen."
            );
            cidrs.push(Ipv4 {
                addr: Ipv4Addr::from(next as u32),
                mask,
            });
            next += 1u64 << (MAX_LENGTH - mask);
        }
        cidrs
    }
}

impl fmt::Display for IpRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            format_address(self.start),
            format_address(self.end)
        )
    }
}
