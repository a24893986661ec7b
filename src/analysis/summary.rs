//! Headline figures, building-age bands and per-district price spread.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::analysis::stats::{mean, median, quantile_sorted, sorted};
use crate::domain::CleanRecord;

/// Headline figures for the clean set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Kpis {
    pub count: usize,
    pub mean_unit_price: f64,
    pub median_unit_price: f64,
    pub mean_total_price: f64,
}

/// `None` for an empty set.
pub fn kpis(records: &[CleanRecord]) -> Option<Kpis> {
    let unit: Vec<f64> = records.iter().map(|r| r.unit_price).collect();
    let total: Vec<f64> = records.iter().map(|r| r.total_price_major).collect();
    Some(Kpis {
        count: records.len(),
        mean_unit_price: mean(&unit)?,
        median_unit_price: median(&unit)?,
        mean_total_price: mean(&total)?,
    })
}

/// Building-age categories: `(-1, 5]`, `(5, 20]`, `(20, 100]` years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgeBand {
    New,
    Mid,
    Old,
}

impl AgeBand {
    pub const ALL: [AgeBand; 3] = [AgeBand::New, AgeBand::Mid, AgeBand::Old];

    /// Ages above 100 years fall outside every band.
    pub fn of(age: u32) -> Option<Self> {
        match age {
            0..=5 => Some(AgeBand::New),
            6..=20 => Some(AgeBand::Mid),
            21..=100 => Some(AgeBand::Old),
            _ => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AgeBand::New => "新成屋(0-5)",
            AgeBand::Mid => "中古屋(5-20)",
            AgeBand::Old => "老屋(>20)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgeBandStats {
    pub band: AgeBand,
    pub count: usize,
    pub median_unit_price: Option<f64>,
}

/// One entry per band, in band order, including empty bands.
pub fn age_bands(records: &[CleanRecord]) -> Vec<AgeBandStats> {
    let mut prices: BTreeMap<AgeBand, Vec<f64>> = BTreeMap::new();
    for r in records {
        if let Some(band) = AgeBand::of(r.building_age) {
            prices.entry(band).or_default().push(r.unit_price);
        }
    }

    AgeBand::ALL
        .iter()
        .map(|&band| {
            let values = prices.get(&band).map(Vec::as_slice).unwrap_or(&[]);
            AgeBandStats {
                band,
                count: values.len(),
                median_unit_price: median(values),
            }
        })
        .collect()
}

/// Unit-price five-number summary for one district.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictStats {
    pub district: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Per-district unit-price spread, sorted by district name.
pub fn district_stats(records: &[CleanRecord]) -> Vec<DistrictStats> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for r in records {
        groups.entry(r.raw.district.trim()).or_default().push(r.unit_price);
    }

    groups
        .into_iter()
        .filter_map(|(district, values)| {
            let s = sorted(&values);
            Some(DistrictStats {
                district: district.to_string(),
                count: s.len(),
                min: *s.first()?,
                q1: quantile_sorted(&s, 0.25)?,
                median: quantile_sorted(&s, 0.5)?,
                q3: quantile_sorted(&s, 0.75)?,
                max: *s.last()?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CoercedFields, RawRecord};

    fn record(district: &str, unit_price: f64, total: f64, age: u32) -> CleanRecord {
        CleanRecord {
            raw: RawRecord {
                district: district.to_string(),
                ..RawRecord::default()
            },
            transaction_year: 2024,
            numbers: CoercedFields::default(),
            total_price_major: total,
            area_units: 1.0,
            unit_price,
            building_age: age,
        }
    }

    #[test]
    fn kpis_of_small_set() {
        let records = vec![
            record("A", 10.0, 1000.0, 0),
            record("A", 20.0, 2000.0, 0),
            record("B", 60.0, 3000.0, 0),
        ];
        let k = kpis(&records).unwrap();
        assert_eq!(k.count, 3);
        assert!((k.mean_unit_price - 30.0).abs() < 1e-12);
        assert!((k.median_unit_price - 20.0).abs() < 1e-12);
        assert!((k.mean_total_price - 2000.0).abs() < 1e-12);
        assert!(kpis(&[]).is_none());
    }

    #[test]
    fn age_band_edges() {
        assert_eq!(AgeBand::of(0), Some(AgeBand::New));
        assert_eq!(AgeBand::of(5), Some(AgeBand::New));
        assert_eq!(AgeBand::of(6), Some(AgeBand::Mid));
        assert_eq!(AgeBand::of(20), Some(AgeBand::Mid));
        assert_eq!(AgeBand::of(21), Some(AgeBand::Old));
        assert_eq!(AgeBand::of(100), Some(AgeBand::Old));
        assert_eq!(AgeBand::of(101), None);
    }

    #[test]
    fn age_bands_include_empty_categories() {
        let records = vec![record("A", 10.0, 0.0, 2), record("A", 30.0, 0.0, 4), record("A", 5.0, 0.0, 40)];
        let bands = age_bands(&records);
        assert_eq!(bands.len(), 3);
        assert_eq!(bands[0].count, 2);
        assert_eq!(bands[0].median_unit_price, Some(20.0));
        assert_eq!(bands[1].count, 0);
        assert_eq!(bands[1].median_unit_price, None);
        assert_eq!(bands[2].count, 1);
    }

    #[test]
    fn district_stats_are_sorted_by_name() {
        let records = vec![
            record("虎尾鎮", 10.0, 0.0, 0),
            record("斗六市", 1.0, 0.0, 0),
            record("斗六市", 2.0, 0.0, 0),
            record("斗六市", 3.0, 0.0, 0),
            record("斗六市", 4.0, 0.0, 0),
            record("斗六市", 5.0, 0.0, 0),
        ];
        let stats = district_stats(&records);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].district, "斗六市");
        assert_eq!(stats[0].count, 5);
        assert_eq!((stats[0].min, stats[0].q1, stats[0].median, stats[0].q3, stats[0].max), (1.0, 2.0, 3.0, 4.0, 5.0));
        assert_eq!(stats[1].median, 10.0);
    }
}
