//! Integration tests for ip-range-checker
//!
//! These tests drive the public library API the way the service and the
//! command line front end do.

use ip_range_checker::{
    format_address, parse_address, parse_cidr,
    processing::{load_cidrs, RangeSet, RangeSnapshot},
    RangeError,
};

#[test]
fn test_full_workflow() {
    let mut set = RangeSet::new();

    let snapshot = set.insert_cidr("192.168.0.0/24").unwrap();
    assert_eq!(snapshot, RangeSnapshot::from([(3232235520, 3232235775)]));
    assert!(set.is_member_str("192.168.0.10").unwrap());
    assert!(!set.is_member_str("192.168.1.1").unwrap());

    // adjacent block extends the range
    set.insert_cidr("192.168.1.0/24").unwrap();
    assert_eq!(set.len(), 1);
    assert!(set.is_member_str("192.168.1.1").unwrap());

    // distant block stays separate
    set.insert_cidr("10.0.0.0/8").unwrap();
    assert_eq!(set.len(), 2);

    set.reset();
    assert!(set.snapshot().is_empty());
    assert!(!set.is_member_str("10.1.1.1").unwrap());
}

#[test]
fn test_sorted_and_disjoint_after_load() {
    let text = "\
10.0.0.0/16
10.2.0.0/16
10.1.0.0/16
172.16.0.0/12
192.168.10.0/24
192.168.12.0/24
192.168.11.128/25
192.168.11.0/25
8.8.8.8/32
";
    let mut set = RangeSet::new();
    let report = load_cidrs(&mut set, text.lines());
    assert_eq!(report.loaded, 9);
    assert!(report.rejected.is_empty());

    let ranges: Vec<_> = set.iter().collect();
    assert_eq!(ranges.len(), 4);
    for pair in ranges.windows(2) {
        assert!(
            u64::from(pair[0].end()) + 1 < u64::from(pair[1].start()),
            "ranges should be sorted and apart: {} / {}",
            pair[0],
            pair[1]
        );
    }
    assert_eq!(ranges[1].to_string(), "10.0.0.0 - 10.2.255.255");
    assert_eq!(ranges[3].to_string(), "192.168.10.0 - 192.168.12.255");
}

#[test]
fn test_client_supplied_snapshot() {
    let mut server = RangeSet::new();
    server.insert_cidr("192.168.1.0/24").unwrap();

    // A caller holding a previous snapshot can rebuild and extend it.
    let json = serde_json::to_string(&server.snapshot()).unwrap();
    let prior: RangeSnapshot = serde_json::from_str(&json).unwrap();
    let mut rebuilt = RangeSet::from_snapshot(&prior).unwrap();
    rebuilt.insert_cidr("192.168.2.0/24").unwrap();

    assert_eq!(rebuilt.len(), 1);
    assert!(rebuilt.is_member_str("192.168.2.200").unwrap());
    assert!(!server.is_member_str("192.168.2.200").unwrap());
}

#[test]
fn test_format_errors() {
    assert!(matches!(
        parse_address("192.168.1"),
        Err(RangeError::InvalidAddress { .. })
    ));
    assert!(matches!(
        parse_cidr("192.168.1.0"),
        Err(RangeError::InvalidCidr { .. })
    ));
    assert_eq!(format_address(parse_address("8.8.4.4").unwrap()), "8.8.4.4");
}
