//! Derived columns: total price in 萬元, area in 坪, unit price, building age.
//!
//! Every function here is a pure function of one record.

use crate::clean::calendar::roc_year;
use crate::clean::numeric::coerce_f64;
use crate::domain::{CleanRecord, CoercedFields, NormalizedRecord, RawRecord};

/// NTD per 萬元.
pub const PRICE_MAJOR_DIVISOR: f64 = 10_000.0;
/// 坪 per square meter.
pub const SQM_TO_PING: f64 = 0.3025;

/// Convert the date and numeric columns of a raw record.
///
/// A transaction date without a valid year drops the record (`None`). A bad
/// completion date only clears `completion_year`; the two failures are
/// handled differently on purpose.
pub fn normalize(raw: RawRecord) -> Option<NormalizedRecord> {
    let transaction_year = roc_year(&raw.transaction_date)?;
    let completion_year = roc_year(&raw.completion_date);
    let numbers = CoercedFields {
        total_price: coerce_f64(&raw.total_price),
        unit_price_sqm: coerce_f64(&raw.unit_price_sqm),
        building_area_sqm: coerce_f64(&raw.building_area_sqm),
        land_area_sqm: coerce_f64(&raw.land_area_sqm),
    };

    Some(NormalizedRecord {
        raw,
        transaction_year,
        completion_year,
        numbers,
    })
}

/// Compute the derived columns.
///
/// The published unit price (`numbers.unit_price_sqm`) is deliberately not an
/// input: unit price is always recomputed from total price and area.
pub fn derive(record: NormalizedRecord) -> CleanRecord {
    let total_price_major = record.numbers.total_price / PRICE_MAJOR_DIVISOR;
    let area_units = area_units(&record.numbers);
    let unit_price = unit_price(total_price_major, area_units);
    let building_age = building_age(record.transaction_year, record.completion_year);

    CleanRecord {
        raw: record.raw,
        transaction_year: record.transaction_year,
        numbers: record.numbers,
        total_price_major,
        area_units,
        unit_price,
        building_age,
    }
}

/// Building area in 坪, falling back to land area when it is exactly zero.
pub fn area_units(numbers: &CoercedFields) -> f64 {
    let building = numbers.building_area_sqm * SQM_TO_PING;
    if building == 0.0 {
        numbers.land_area_sqm * SQM_TO_PING
    } else {
        building
    }
}

/// `total / area`, with undefined results coerced to `0.0`.
pub fn unit_price(total_price_major: f64, area_units: f64) -> f64 {
    let v = total_price_major / area_units;
    if v.is_finite() { v } else { 0.0 }
}

pub fn building_age(transaction_year: i32, completion_year: Option<i32>) -> u32 {
    let Some(completion_year) = completion_year else {
        return 0;
    };
    u32::try_from(transaction_year.saturating_sub(completion_year)).unwrap_or(0)
}
