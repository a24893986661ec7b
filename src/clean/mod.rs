//! Normalization pipeline: raw rows in, clean record set out.
//!
//! Stages run strictly downstream:
//!
//! 1. calendar conversion + numeric coercion (`derive::normalize`)
//! 2. district/subject filter (`filter`)
//! 3. derived columns (`derive::derive`)
//! 4. unit-price band (`outlier`)
//!
//! Stages 1 and 3 are per-record and run on the rayon pool.

pub mod calendar;
pub mod derive;
pub mod filter;
pub mod numeric;
pub mod outlier;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::domain::{CleanRecord, RawRecord};

pub use filter::RecordFilter;

/// Row counts per stage, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub rows_read: usize,
    /// Dropped because the transaction date has no valid year.
    pub invalid_date: usize,
    pub filtered_out: usize,
    pub outliers: usize,
    pub rows_used: usize,
}

/// The clean record set plus how it was obtained.
#[derive(Debug, Clone, Default)]
pub struct CleanSet {
    pub records: Vec<CleanRecord>,
    pub stats: PipelineStats,
}

impl CleanSet {
    /// `true` when nothing survived filtering; callers render a "no data" message.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Sorted, de-duplicated district names present in the set.
    pub fn districts(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .records
            .iter()
            .map(|r| r.raw.district.trim().to_string())
            .filter(|d| !d.is_empty())
            .collect();
        out.sort();
        out.dedup();
        out
    }
}

/// Run every stage over `records`.
pub fn clean_records(records: Vec<RawRecord>, filter: &RecordFilter) -> CleanSet {
    let rows_read = records.len();

    let normalized: Vec<_> = records.into_par_iter().filter_map(derive::normalize).collect();
    let invalid_date = rows_read - normalized.len();

    let kept: Vec<_> = normalized
        .into_iter()
        .filter(|r| filter.matches(&r.raw))
        .collect();
    let filtered_out = rows_read - invalid_date - kept.len();

    let mut derived: Vec<CleanRecord> = kept.into_par_iter().map(derive::derive).collect();
    let outliers = outlier::exclude_outliers(&mut derived);

    let stats = PipelineStats {
        rows_read,
        invalid_date,
        filtered_out,
        outliers,
        rows_used: derived.len(),
    };
    debug!(?stats, "stage counts");
    info!(
        rows_read,
        rows_used = stats.rows_used,
        "normalized transaction records"
    );

    CleanSet {
        records: derived,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SubjectFilter;

    fn raw(district: &str, subject: &str, tx: &str, total: &str, building: &str, land: &str) -> RawRecord {
        RawRecord {
            district: district.to_string(),
            subject: subject.to_string(),
            transaction_date: tx.to_string(),
            total_price: total.to_string(),
            building_area_sqm: building.to_string(),
            land_area_sqm: land.to_string(),
            ..RawRecord::default()
        }
    }

    fn sample() -> Vec<RawRecord> {
        vec![
            raw("斗六市", "房地(土地+建物)", "1130615", "30000000", "100", "20"),
            raw("斗六市", "土地", "1130701", "10000000", "0", "200"),
            raw("虎尾鎮", "建物", "1130520", "8000000", "80", ""),
            // no transaction year
            raw("斗六市", "建物", "", "8000000", "80", ""),
            // unit price far above the band
            raw("斗六市", "建物", "1130520", "900000000", "10", ""),
            // zero area -> unit price 0 -> outside the band
            raw("虎尾鎮", "土地", "1130520", "5000000", "0", "0"),
        ]
    }

    #[test]
    fn stage_counts_add_up() {
        let set = clean_records(sample(), &RecordFilter::pass_all());
        let s = set.stats;
        assert_eq!(s.rows_read, 6);
        assert_eq!(s.invalid_date, 1);
        assert_eq!(s.filtered_out, 0);
        assert_eq!(s.outliers, 2);
        assert_eq!(s.rows_used, 3);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn every_clean_record_is_inside_the_band() {
        let set = clean_records(sample(), &RecordFilter::pass_all());
        for r in &set.records {
            assert!(r.unit_price.is_finite());
            assert!(r.unit_price > 0.1 && r.unit_price < 300.0);
        }
    }

    #[test]
    fn filter_runs_before_derivation() {
        let filter = RecordFilter::new(["斗六市".to_string()].into_iter().collect(), SubjectFilter::Land);
        let set = clean_records(sample(), &filter);
        assert_eq!(set.len(), 1);
        assert_eq!(set.records[0].raw.subject, "土地");
        assert_eq!(set.stats.filtered_out, 4);
    }

    #[test]
    fn order_of_input_rows_is_preserved() {
        let set = clean_records(sample(), &RecordFilter::pass_all());
        let dates: Vec<_> = set.records.iter().map(|r| r.raw.transaction_date.as_str()).collect();
        assert_eq!(dates, vec!["1130615", "1130701", "1130520"]);
    }

    #[test]
    fn no_matches_is_an_empty_set_not_an_error() {
        let filter = RecordFilter::new(["不存在區".to_string()].into_iter().collect(), SubjectFilter::All);
        let set = clean_records(sample(), &filter);
        assert!(set.is_empty());
        assert!(set.districts().is_empty());
    }

    #[test]
    fn districts_are_sorted_and_unique() {
        let set = clean_records(sample(), &RecordFilter::pass_all());
        assert_eq!(set.districts(), vec!["斗六市".to_string(), "虎尾鎮".to_string()]);
    }
}
