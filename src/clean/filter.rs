//! District and transaction-subject predicates.

use std::collections::BTreeSet;

use crate::domain::{RawRecord, SubjectFilter};

/// Subject-label token for combined building + land transactions.
pub const TOKEN_BUILDING_LAND: &str = "房地";
/// Subject-label token for building transactions.
pub const TOKEN_BUILDING: &str = "建物";
/// Subject-label token for land transactions.
pub const TOKEN_LAND: &str = "土地";

/// Both predicates, combined with a logical AND.
#[derive(Debug, Clone)]
pub struct RecordFilter {
    /// Empty means no district filtering.
    pub districts: BTreeSet<String>,
    pub subject: SubjectFilter,
}

impl RecordFilter {
    pub fn new(districts: BTreeSet<String>, subject: SubjectFilter) -> Self {
        Self { districts, subject }
    }

    /// A filter that keeps every record.
    pub fn pass_all() -> Self {
        Self::new(BTreeSet::new(), SubjectFilter::All)
    }

    pub fn matches(&self, record: &RawRecord) -> bool {
        self.matches_district(&record.district) && matches_subject(&record.subject, self.subject)
    }

    fn matches_district(&self, district: &str) -> bool {
        self.districts.is_empty() || self.districts.contains(district.trim())
    }
}

/// Apply a subject mode to a free-text label.
///
/// `房地(土地+建物)` contains `土地` too, so the land-only mode must exclude
/// `房地` explicitly or those rows would be counted in both categories.
pub fn matches_subject(label: &str, mode: SubjectFilter) -> bool {
    match mode {
        SubjectFilter::BuildingLand => {
            label.contains(TOKEN_BUILDING_LAND) || label.contains(TOKEN_BUILDING)
        }
        SubjectFilter::Land => label.contains(TOKEN_LAND) && !label.contains(TOKEN_BUILDING_LAND),
        SubjectFilter::All => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(district: &str, subject: &str) -> RawRecord {
        RawRecord {
            district: district.to_string(),
            subject: subject.to_string(),
            ..RawRecord::default()
        }
    }

    #[test]
    fn land_label_is_land_only() {
        assert!(matches_subject("土地", SubjectFilter::Land));
        assert!(!matches_subject("土地", SubjectFilter::BuildingLand));
    }

    #[test]
    fn building_land_label_never_counts_as_land() {
        let label = "房地(土地+建物)";
        assert!(matches_subject(label, SubjectFilter::BuildingLand));
        assert!(!matches_subject(label, SubjectFilter::Land));
    }

    #[test]
    fn building_only_labels_match_building_mode() {
        assert!(matches_subject("建物", SubjectFilter::BuildingLand));
        assert!(matches_subject("房地(土地+建物)+車位", SubjectFilter::BuildingLand));
        assert!(!matches_subject("車位", SubjectFilter::BuildingLand));
        assert!(matches_subject("車位", SubjectFilter::All));
    }

    #[test]
    fn empty_district_set_keeps_everything() {
        let filter = RecordFilter::pass_all();
        assert!(filter.matches(&record("斗六市", "車位")));
        assert!(filter.matches(&record("", "")));
    }

    #[test]
    fn district_and_subject_are_combined() {
        let filter = RecordFilter::new(
            ["斗六市".to_string()].into_iter().collect(),
            SubjectFilter::Land,
        );
        assert!(filter.matches(&record("斗六市", "土地")));
        assert!(!filter.matches(&record("虎尾鎮", "土地")));
        assert!(!filter.matches(&record("斗六市", "房地(土地+建物)")));
    }
}
