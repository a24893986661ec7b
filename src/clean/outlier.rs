//! Unit-price acceptance band.

use crate::domain::CleanRecord;

/// Exclusive lower bound of plausible unit prices (萬/坪).
pub const UNIT_PRICE_MIN: f64 = 0.1;
/// Exclusive upper bound of plausible unit prices (萬/坪).
pub const UNIT_PRICE_MAX: f64 = 300.0;

pub fn within_band(unit_price: f64) -> bool {
    unit_price > UNIT_PRICE_MIN && unit_price < UNIT_PRICE_MAX
}

/// Drop records outside the band (including the `0.0` unit prices produced by
/// failed derivations). Returns how many were removed.
pub fn exclude_outliers(records: &mut Vec<CleanRecord>) -> usize {
    let before = records.len();
    records.retain(|r| within_band(r.unit_price));
    before - records.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_is_exclusive_on_both_ends() {
        assert!(!within_band(0.0));
        assert!(!within_band(0.1));
        assert!(within_band(0.1000001));
        assert!(within_band(299.99));
        assert!(!within_band(300.0));
        assert!(!within_band(f64::NAN));
    }
}
