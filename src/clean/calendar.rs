//! ROC (Minguo) calendar dates.
//!
//! Published dates look like `1130615` or `990101`: a variable-width ROC year
//! followed by a fixed four-digit `MMDD` suffix.

/// Offset between ROC years and Gregorian years.
pub const ROC_EPOCH_OFFSET: i32 = 1911;

const MONTH_DAY_LEN: usize = 4;
const MIN_DATE_LEN: usize = 6;

/// Convert a ROC date string to an absolute (Gregorian) year.
///
/// Returns `None` for empty input, strings shorter than six characters, or a
/// year prefix that is not an integer.
pub fn roc_year(date: &str) -> Option<i32> {
    let date = date.trim();
    let len = date.chars().count();
    if len < MIN_DATE_LEN {
        return None;
    }

    let (split, _) = date.char_indices().nth(len - MONTH_DAY_LEN)?;
    let local_year = date[..split].trim().parse::<i32>().ok()?;
    local_year.checked_add(ROC_EPOCH_OFFSET)
}
