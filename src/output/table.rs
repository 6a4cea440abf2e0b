//! Range table and timeline rendering.
//!
//! Both renderers take the snapshot explicitly and derive their layout
//! (span, bar positions) from it on every call.

use super::terminal::{format_count, format_field};
use crate::models::{format_address, IpRange};
use crate::processing::RangeSnapshot;
use colored::Colorize;
use itertools::Itertools;

const START_WIDTH: usize = 15;
const SIZE_WIDTH: usize = 13;

/// One line per range: index, start, end, address count, covering CIDRs.
pub fn format_range_rows(snapshot: &RangeSnapshot) -> Vec<String> {
    snapshot
        .iter()
        .enumerate()
        .map(|(i, (&start, &end))| {
            let range = IpRange { start, end };
            let cidrs = range.to_cidrs().iter().map(|c| c.to_string()).join(",");
            format!(
                "{idx} {start} {end} {size} {cidrs}",
                idx = format_field(i + 1, 4),
                start = format_field(format_address(start), START_WIDTH),
                end = format_field(format_address(end), START_WIDTH),
                size = format_field(format_count(range.size()), SIZE_WIDTH),
            )
        })
        .collect()
}

/// Draw the ranges on a `width` character line spanning the lowest start to
/// the highest end. Every range gets at least one `#`.
pub fn render_timeline(snapshot: &RangeSnapshot, width: usize) -> String {
    let (Some((&min, _)), Some((_, &max))) = (snapshot.first_key_value(), snapshot.last_key_value())
    else {
        return String::new();
    };
    if width == 0 {
        return String::new();
    }

    let span = (u64::from(max) - u64::from(min)).max(1);
    let column = |addr: u32| -> usize {
        let offset = u64::from(addr) - u64::from(min);
        ((offset * (width as u64 - 1)) / span) as usize
    };

    let mut line = vec!['.'; width];
    for (&start, &end) in snapshot {
        for cell in &mut line[column(start)..=column(end)] {
            *cell = '#';
        }
    }
    line.into_iter().collect()
}

/// Print the table, a timeline and a summary line to stdout.
pub fn print_ranges(snapshot: &RangeSnapshot) {
    if snapshot.is_empty() {
        println!("{}", "No IP ranges stored.".yellow());
        return;
    }

    println!(
        "{}",
        format!(
            "{idx} {start} {end} {size} cidrs",
            idx = format_field("#", 4),
            start = format_field("start", START_WIDTH),
            end = format_field("end", START_WIDTH),
            size = format_field("addresses", SIZE_WIDTH),
        )
        .bold()
    );
    for row in format_range_rows(snapshot) {
        println!("{row}");
    }

    println!();
    println!("{}", render_timeline(snapshot, 64).cyan());

    let total: u64 = snapshot
        .iter()
        .map(|(&start, &end)| IpRange { start, end }.size())
        .sum();
    println!(
        "#{}# {} range(s) covering {} addresses",
        "TOTAL".on_blue(),
        snapshot.len(),
        format_count(total)
    );
}
