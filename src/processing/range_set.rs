//! Sorted collection of disjoint IPv4 ranges.
//!
//! Ranges are kept in a `BTreeMap` keyed by start address. No two stored
//! ranges overlap or touch: for neighbours `a` and `b`, `a.end + 1 < b.start`.
//! Every insert merges the new range with whatever it overlaps or borders,
//! so that invariant holds after each mutation.

use crate::error::RangeError;
use crate::models::{parse_address, parse_cidr, IpRange};
use itertools::Itertools;
use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Included, Unbounded};

/// Read-only view of the collection, `start -> end` in ascending order.
///
/// Serialises to the JSON object the front end consumes, for example
/// `{"3232235520": 3232235775}`.
pub type RangeSnapshot = BTreeMap<u32, u32>;

/// Disjoint, sorted IPv4 ranges with merge-on-insert.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RangeSet {
    ranges: BTreeMap<u32, u32>,
}

impl RangeSet {
    pub fn new() -> RangeSet {
        RangeSet::default()
    }

    /// Rebuild a collection from a snapshot supplied by a caller.
    ///
    /// Entries with `start > end` are rejected. Overlapping or touching
    /// entries are merged, so the result is always a valid collection.
    pub fn from_snapshot(snapshot: &RangeSnapshot) -> Result<RangeSet, RangeError> {
        let ranges = snapshot
            .iter()
            .map(|(&start, &end)| IpRange::new(start, end))
            .collect::<Result<Vec<_>, _>>()?;

        let mut set = RangeSet::new();
        for range in ranges {
            set.insert(range);
        }
        if set.len() != snapshot.len() {
            log::debug!(
                "from_snapshot() merged {} entries into {} ranges",
                snapshot.len(),
                set.len()
            );
        }
        Ok(set)
    }

    /// Add `range`, merging it with every stored range it overlaps or borders.
    ///
    /// Returns the full collection after the mutation. Inserting a range that
    /// is already covered leaves the collection unchanged.
    pub fn insert(&mut self, range: IpRange) -> RangeSnapshot {
        let group = self.merge_group(&range);

        let mut merged = range;
        for start in &group {
            if let Some(end) = self.ranges.remove(start) {
                merged.start = merged.start.min(*start);
                merged.end = merged.end.max(end);
            }
        }
        self.ranges.insert(merged.start, merged.end);
        self.assert_isolated(&merged);

        log::debug!(
            "insert({range}) absorbed {} range(s) => {merged}, total {}",
            group.len(),
            self.ranges.len()
        );
        self.snapshot()
    }

    /// Parse `cidr` and insert it. Nothing is mutated when parsing fails.
    pub fn insert_cidr(&mut self, cidr: &str) -> Result<RangeSnapshot, RangeError> {
        let range = parse_cidr(cidr)?;
        Ok(self.insert(range))
    }

    /// True iff some stored range contains `addr`; both bounds are inclusive.
    pub fn is_member(&self, addr: u32) -> bool {
        self.ranges
            .range(..=addr)
            .next_back()
            .is_some_and(|(_, &end)| addr <= end)
    }

    /// Parse dotted-decimal `text` and test membership.
    pub fn is_member_str(&self, text: &str) -> Result<bool, RangeError> {
        let addr = parse_address(text)?;
        Ok(self.is_member(addr))
    }

    /// Drop every range.
    pub fn reset(&mut self) {
        self.ranges.clear();
    }

    pub fn snapshot(&self) -> RangeSnapshot {
        self.ranges.clone()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Ranges in ascending start order.
    pub fn iter(&self) -> impl Iterator<Item = IpRange> + '_ {
        self.ranges
            .iter()
            .map(|(&start, &end)| IpRange { start, end })
    }

    /// Number of distinct addresses covered by the collection.
    pub fn total_addresses(&self) -> u64 {
        self.iter().map(|r| r.size()).sum()
    }

    /// Full pass over the collection checking order, bounds and spacing.
    pub fn is_normalized(&self) -> bool {
        self.iter().all(|r| r.start <= r.end)
            && self
                .iter()
                .tuple_windows()
                .all(|(a, b)| u64::from(a.end) + 1 < u64::from(b.start))
    }

    /// Start addresses of stored ranges that overlap or border `range`.
    ///
    /// Only the predecessor (greatest start <= `range.start`) can reach in
    /// from the left; everything else must start inside `(start, end + 1]`.
    fn merge_group(&self, range: &IpRange) -> Vec<u32> {
        let mut group = Vec::new();
        if let Some((&start, &end)) = self.ranges.range(..=range.start).next_back() {
            if (IpRange { start, end }).touches(range) {
                group.push(start);
            }
        }
        let upper = range.end.saturating_add(1);
        group.extend(
            self.ranges
                .range((Excluded(range.start), Included(upper)))
                .map(|(&start, _)| start),
        );
        group
    }

    /// The merged range must be separated from both of its neighbours.
    fn assert_isolated(&self, merged: &IpRange) {
        if let Some((&start, &end)) = self.ranges.range(..merged.start).next_back() {
            let prev = IpRange { start, end };
            assert!(
                !prev.touches(merged),
                "previous range [{prev}] touches merged range [{merged}], should never happen."
            );
        }
        if let Some((&start, &end)) = self
            .ranges
            .range((Excluded(merged.start), Unbounded))
            .next()
        {
            let next = IpRange { start, end };
            assert!(
                !next.touches(merged),
                "next range [{next}] touches merged range [{merged}], should never happen."
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, end: u32) -> IpRange {
        IpRange::new(start, end).unwrap()
    }

    fn set_with(cidrs: &[&str]) -> RangeSet {
        let mut set = RangeSet::new();
        for cidr in cidrs {
            set.insert_cidr(cidr).unwrap();
        }
        set
    }

    fn included(set: &RangeSet, ip: &str) -> bool {
        set.is_member_str(ip).unwrap()
    }

    #[test]
    fn test_empty_set() {
        let set = RangeSet::new();
        assert!(set.is_empty());
        assert!(set.snapshot().is_empty());
        assert!(!set.is_member(0));
        assert!(!set.is_member(u32::MAX));
    }

    #[test]
    fn test_adjacent_ranges_merge() {
        let mut set = RangeSet::new();
        set.insert(range(10, 20));
        let snapshot = set.insert(range(21, 30));
        assert_eq!(snapshot, RangeSnapshot::from([(10, 30)]));

        // and from the other side
        let snapshot = set.insert(range(5, 9));
        assert_eq!(snapshot, RangeSnapshot::from([(5, 30)]));
    }

    #[test]
    fn test_gapped_ranges_stay_apart() {
        let mut set = RangeSet::new();
        set.insert(range(10, 20));
        let snapshot = set.insert(range(25, 30));
        assert_eq!(snapshot, RangeSnapshot::from([(10, 20), (25, 30)]));
        assert!(!set.is_member(21));
        assert!(!set.is_member(24));
    }

    #[test]
    fn test_contained_range_is_absorbed() {
        let mut set = RangeSet::new();
        set.insert(range(10, 30));
        let snapshot = set.insert(range(15, 20));
        assert_eq!(snapshot, RangeSnapshot::from([(10, 30)]));
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = RangeSet::new();
        let once = set.insert(range(100, 200));
        let twice = set.insert(range(100, 200));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_new_range_swallows_many() {
        let mut set = RangeSet::new();
        set.insert(range(10, 12));
        set.insert(range(20, 22));
        set.insert(range(30, 32));
        set.insert(range(50, 60));
        let snapshot = set.insert(range(11, 40));
        assert_eq!(snapshot, RangeSnapshot::from([(10, 40), (50, 60)]));
    }

    #[test]
    fn test_top_of_address_space() {
        let mut set = RangeSet::new();
        set.insert(range(u32::MAX - 10, u32::MAX));
        set.insert(range(u32::MAX - 20, u32::MAX - 11));
        assert_eq!(set.snapshot(), RangeSnapshot::from([(u32::MAX - 20, u32::MAX)]));
        assert!(set.is_member(u32::MAX));

        set.insert(range(0, 0));
        set.insert_cidr("0.0.0.0/0").unwrap();
        assert_eq!(set.snapshot(), RangeSnapshot::from([(0, u32::MAX)]));
        assert_eq!(set.total_addresses(), 1u64 << 32);
    }

    #[test]
    fn test_cidr_example() {
        let mut set = RangeSet::new();
        let snapshot = set.insert_cidr("192.168.0.0/24").unwrap();
        assert_eq!(snapshot, RangeSnapshot::from([(3232235520, 3232235775)]));
        assert!(included(&set, "192.168.0.10"));
        assert!(!included(&set, "192.168.1.1"));
    }

    #[test]
    fn test_membership_bounds_inclusive() {
        let set = set_with(&["192.168.1.0/24"]);
        assert!(included(&set, "192.168.1.0"));
        assert!(included(&set, "192.168.1.255"));
        assert!(!included(&set, "192.168.0.255"));
        assert!(!included(&set, "192.168.2.0"));
    }

    #[test]
    fn test_bad_cidr_leaves_set_untouched() {
        let mut set = set_with(&["10.0.0.0/8"]);
        let before = set.snapshot();
        assert!(set.insert_cidr("10.0.0.0/33").is_err());
        assert!(set.insert_cidr("garbage").is_err());
        assert_eq!(set.snapshot(), before);
        assert!(set.is_member_str("10.0.0").is_err());
    }

    #[test]
    fn test_reset() {
        let mut set = set_with(&["10.0.0.0/8", "192.168.0.0/16"]);
        set.reset();
        assert!(set.snapshot().is_empty());
        assert!(!included(&set, "10.1.1.1"));
        assert!(!included(&set, "192.168.1.1"));
    }

    #[test]
    fn test_same_start_new_larger() {
        let mut set = set_with(&["192.168.2.16/31"]);
        assert!(!included(&set, "192.168.2.22"));
        set.insert_cidr("192.168.2.16/29").unwrap();
        assert!(included(&set, "192.168.2.22"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_same_start_existing_larger() {
        let mut set = set_with(&["192.168.1.0/24"]);
        assert!(included(&set, "192.168.1.250"));
        set.insert_cidr("192.168.1.0/25").unwrap();
        assert!(included(&set, "192.168.1.250"));
        assert_eq!(set.snapshot(), set_with(&["192.168.1.0/24"]).snapshot());
    }

    #[test]
    fn test_same_end_new_larger() {
        let mut set = set_with(&["192.6.0.0/15"]);
        assert!(!included(&set, "192.5.1.5"));
        set.insert_cidr("192.0.0.0/13").unwrap();
        assert!(included(&set, "192.5.1.5"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_same_end_existing_larger() {
        let mut set = set_with(&["192.168.0.0/23"]);
        assert!(included(&set, "192.168.1.247"));
        set.insert_cidr("192.168.1.240/28").unwrap();
        assert!(included(&set, "192.168.1.247"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_existing_contains_new() {
        let mut set = set_with(&["192.0.0.0/9"]);
        set.insert_cidr("192.2.0.0/15").unwrap();
        assert!(included(&set, "192.10.1.247"));
        assert_eq!(set.snapshot(), set_with(&["192.0.0.0/9"]).snapshot());
    }

    #[test]
    fn test_new_contains_existing() {
        let mut set = set_with(&["200.0.0.0/6"]);
        assert!(!included(&set, "192.168.1.247"));
        set.insert_cidr("192.0.0.0/4").unwrap();
        assert!(included(&set, "192.168.1.247"));
        assert_eq!(set.snapshot(), set_with(&["192.0.0.0/4"]).snapshot());
    }

    #[test]
    fn test_three_ranges_keep_gap() {
        let set = set_with(&["192.168.1.0/24", "192.168.5.0/24", "192.168.1.247/32"]);
        assert_eq!(set.len(), 2);
        assert!(!included(&set, "192.168.2.248"));
    }

    #[test]
    fn test_bridge_merges_both_neighbours() {
        let set = set_with(&["192.168.1.0/24", "192.168.3.0/24", "192.168.2.0/24"]);
        assert_eq!(set.len(), 1);
        for ip in ["192.168.1.248", "192.168.2.24", "192.168.3.43"] {
            assert!(included(&set, ip), "{ip} should be included");
        }
        for ip in ["192.168.0.248", "192.168.4.0"] {
            assert!(!included(&set, ip), "{ip} should be excluded");
        }
    }

    #[test]
    fn test_from_snapshot() {
        let snapshot = RangeSnapshot::from([(10, 20), (21, 30), (40, 50), (45, 48)]);
        let set = RangeSet::from_snapshot(&snapshot).unwrap();
        assert_eq!(set.snapshot(), RangeSnapshot::from([(10, 30), (40, 50)]));
        assert!(set.is_normalized());

        let bad = RangeSnapshot::from([(10, 5)]);
        assert_eq!(
            RangeSet::from_snapshot(&bad).unwrap_err(),
            RangeError::InvalidRange { start: 10, end: 5 }
        );
    }

    #[test]
    fn test_snapshot_json_shape() {
        let set = set_with(&["192.168.0.0/24", "10.0.0.0/8"]);
        let json = serde_json::to_string(&set.snapshot()).unwrap();
        assert_eq!(json, r#"{"167772160":184549375,"3232235520":3232235775}"#);

        let back: RangeSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set.snapshot());
    }

    /// Small linear congruential generator so the test needs no extra crates.
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self) -> u32 {
            self.0 = self
                .0
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (self.0 >> 33) as u32
        }
    }

    #[test]
    fn test_invariant_holds_after_every_insert() {
        let mut rng = Lcg(0x5eed);
        let mut set = RangeSet::new();
        let mut inserted: Vec<IpRange> = Vec::new();
        let base = 0x0A00_0000u32;

        for _ in 0..500 {
            let offset = rng.next() % 4096;
            let len = 24 + (rng.next() % 9) as u8;
            let cidr = format!("{}/{len}", crate::models::format_address(base + offset));
            let new_range = parse_cidr(&cidr).unwrap();
            set.insert(new_range);
            inserted.push(new_range);

            assert!(set.is_normalized(), "invariant broken after {cidr}");
        }

        for addr in (base - 16)..(base + 4096 + 256) {
            let expected = inserted.iter().any(|r| r.contains(addr));
            assert_eq!(set.is_member(addr), expected, "addr {addr}");
        }
    }
}
