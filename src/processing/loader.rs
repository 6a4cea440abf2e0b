//! Bulk loading of CIDR lists.
//!
//! One block per line. Blank lines and `#` comments are skipped; a line that
//! does not parse is reported and skipped, it does not abort the load.

use super::range_set::RangeSet;
use crate::error::RangeError;
use std::error::Error;
use std::path::Path;

/// Outcome of a bulk load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Number of blocks inserted.
    pub loaded: usize,
    /// Rejected lines as (1-based line number, error).
    pub rejected: Vec<(usize, RangeError)>,
}

/// Insert every CIDR block found in `lines` into `set`.
pub fn load_cidrs<'a, I>(set: &mut RangeSet, lines: I) -> LoadReport
where
    I: IntoIterator<Item = &'a str>,
{
    let mut report = LoadReport::default();

    for (i, line) in lines.into_iter().enumerate() {
        let cidr = line.split('#').next().unwrap_or("").trim();
        if cidr.is_empty() {
            continue;
        }
        match set.insert_cidr(cidr) {
            Ok(_) => report.loaded += 1,
            Err(e) => {
                log::warn!("Skipping line {}: {}", i + 1, e);
                report.rejected.push((i + 1, e));
            }
        }
    }

    log::info!(
        "Loaded {} CIDR blocks into {} ranges, rejected {}",
        report.loaded,
        set.len(),
        report.rejected.len()
    );
    report
}

/// Read `path` and load its CIDR blocks into `set`.
pub fn load_cidr_file(set: &mut RangeSet, path: &str) -> Result<LoadReport, Box<dyn Error>> {
    if !Path::new(path).exists() {
        return Err(format!("CIDR file does not exist: {path}").into());
    }
    log::info!("Reading CIDR blocks from file: {path}");
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading CIDR file {path}: {e}"))?;
    Ok(load_cidrs(set, contents.lines()))
}
