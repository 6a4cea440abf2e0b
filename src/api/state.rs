//! Shared, lock-protected range collection owned by the service.

use crate::error::RangeError;
use crate::models::{parse_address, parse_cidr};
use crate::processing::{RangeSet, RangeSnapshot};
use tokio::sync::RwLock;

/// The service's single copy of the range collection.
///
/// `add_cidr` and `reset` take the write lock; queries take the read lock.
/// Input is parsed before any lock is taken, so a malformed request never
/// holds up other callers or touches the collection.
#[derive(Debug, Default)]
pub struct SharedRangeSet {
    ranges: RwLock<RangeSet>,
}

impl SharedRangeSet {
    pub fn new() -> SharedRangeSet {
        SharedRangeSet::default()
    }

    /// Start from an already populated collection, e.g. a seed file.
    pub fn with_ranges(ranges: RangeSet) -> SharedRangeSet {
        SharedRangeSet {
            ranges: RwLock::new(ranges),
        }
    }

    pub async fn add_cidr(&self, cidr: &str) -> Result<RangeSnapshot, RangeError> {
        let range = parse_cidr(cidr)?;
        let snapshot = self.ranges.write().await.insert(range);
        log::info!("Added {cidr} [{range}], now {} range(s)", snapshot.len());
        Ok(snapshot)
    }

    pub async fn is_included(&self, ip: &str) -> Result<bool, RangeError> {
        let addr = parse_address(ip)?;
        let included = self.ranges.read().await.is_member(addr);
        log::debug!("is_included({ip}) = {included}");
        Ok(included)
    }

    pub async fn reset(&self) {
        self.ranges.write().await.reset();
        log::info!("Range collection reset");
    }

    pub async fn snapshot(&self) -> RangeSnapshot {
        self.ranges.read().await.snapshot()
    }

    pub async fn len(&self) -> usize {
        self.ranges.read().await.len()
    }
}
