//! Fixed-width binning and the "hottest range" (modal bin).
//!
//! Bins start at `floor(min)` and extend until they cover `floor(p95)`, so the
//! long tail above the 95th percentile does not stretch the histogram. Values
//! beyond the last bin are not counted.

use crate::analysis::stats::{quantile_sorted, sorted};
use crate::domain::{AnalysisColumn, CleanRecord, Interval};
use crate::error::AppError;

/// Upper-bound percentile of the binned range.
pub const UPPER_QUANTILE: f64 = 0.95;

/// Count `values` into contiguous `[low, low + width)` bins.
///
/// Returns an empty histogram for empty input.
pub fn histogram(values: &[f64], width: u32) -> Result<Vec<Interval>, AppError> {
    if width == 0 {
        return Err(AppError::input("Interval width must be > 0."));
    }
    let sorted = sorted(values);
    let (Some(&min), Some(p95)) = (sorted.first(), quantile_sorted(&sorted, UPPER_QUANTILE)) else {
        return Ok(Vec::new());
    };

    let width = i64::from(width);
    let lower = min.floor() as i64;
    let mut upper = p95.floor() as i64;
    if upper <= lower {
        upper = lower + width;
    }

    let bin_count = ((upper - lower) / width + 1) as usize;
    let mut bins: Vec<Interval> = (0..bin_count as i64)
        .map(|k| Interval {
            low: lower + k * width,
            high: lower + (k + 1) * width,
            count: 0,
        })
        .collect();

    for &v in &sorted {
        let offset = ((v - lower as f64) / width as f64).floor();
        if offset < 0.0 {
            continue;
        }
        match bins.get_mut(offset as usize) {
            Some(bin) => bin.count += 1,
            None => break,
        }
    }

    Ok(bins)
}

/// The bin holding the most values; ties go to the lowest `low`.
///
/// `Ok(None)` means no interval was found (empty input).
pub fn hottest_of(values: &[f64], width: u32) -> Result<Option<Interval>, AppError> {
    let bins = histogram(values, width)?;
    let mut best: Option<Interval> = None;
    for bin in bins {
        if bin.count > best.map_or(0, |b| b.count) {
            best = Some(bin);
        }
    }
    Ok(best)
}

/// Hottest range of one column of the clean record set.
pub fn hottest_interval(
    records: &[CleanRecord],
    column: AnalysisColumn,
    width: u32,
) -> Result<Option<Interval>, AppError> {
    let values: Vec<f64> = records.iter().map(|r| column.value(r)).collect();
    hottest_of(&values, width)
}
