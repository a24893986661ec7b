//! Lenient numeric parsing for published text columns.

/// Parse a numeric text field, treating anything unparseable as `0.0`.
///
/// Non-finite spellings (`inf`, `NaN`) also become `0.0` so nothing undefined
/// reaches the derived columns.
pub fn coerce_f64(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}
