//! Monthly volume/price trend.

use std::collections::BTreeMap;

use crate::domain::{CleanRecord, TrendPoint};

/// Group by transaction month and compute mean unit price and count.
///
/// Output is ascending by period key. Keys compare as strings, which is
/// chronological as long as every key in the set has the same width (true
/// within one release season).
pub fn monthly_trend(records: &[CleanRecord]) -> Vec<TrendPoint> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for r in records {
        let entry = groups.entry(r.period_key()).or_insert((0.0, 0));
        entry.0 += r.unit_price;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(period, (sum, count))| TrendPoint {
            period: period.to_string(),
            mean_unit_price: sum / count as f64,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CoercedFields, RawRecord};

    fn record(date: &str, unit_price: f64) -> CleanRecord {
        CleanRecord {
            raw: RawRecord {
                transaction_date: date.to_string(),
                ..RawRecord::default()
            },
            transaction_year: 2024,
            numbers: CoercedFields::default(),
            total_price_major: 0.0,
            area_units: 0.0,
            unit_price,
            building_age: 0,
        }
    }

    #[test]
    fn groups_by_month_in_ascending_order() {
        let records = vec![
            record("1130615", 20.0),
            record("1130402", 10.0),
            record("1130630", 30.0),
            record("1130411", 14.0),
            record("1130501", 7.0),
        ];
        let trend = monthly_trend(&records);
        let periods: Vec<_> = trend.iter().map(|p| p.period.as_str()).collect();
        assert_eq!(periods, vec!["11304", "11305", "11306"]);

        assert_eq!(trend[0].count, 2);
        assert!((trend[0].mean_unit_price - 12.0).abs() < 1e-12);
        assert_eq!(trend[2].count, 2);
        assert!((trend[2].mean_unit_price - 25.0).abs() < 1e-12);
    }

    #[test]
    fn no_records_no_points() {
        assert!(monthly_trend(&[]).is_empty());
    }

    #[test]
    fn missing_months_are_not_zero_filled() {
        let trend = monthly_trend(&[record("1130115", 1.0), record("1130315", 2.0)]);
        assert_eq!(trend.len(), 2);
        assert!(trend.iter().all(|p| p.count > 0));
    }
}
