//! Missing-value sentinel handling.
//!
//! The trait spreadsheets mark unavailable values with a literal `-`. Blank
//! cells and pandas-style `nan` text exports are also unavailable, but unlike
//! the sentinel they may be back-filled before comparison.

/// Token written for (and read as) "value not available".
pub const MISSING_SENTINEL: &str = "-";

/// Returns true if a raw text cell denotes a missing value.
///
/// # Examples
///
/// ```
/// use froggy_common::is_missing_text;
///
/// assert!(is_missing_text(" - "));
/// assert!(is_missing_text(""));
/// assert!(is_missing_text("NaN"));
/// assert!(!is_missing_text("12.5"));
/// assert!(!is_missing_text("-3"));
/// ```
pub fn is_missing_text(value: &str) -> bool {
    is_blank_text(value) || value.trim() == MISSING_SENTINEL
}

/// Returns true for an empty cell or a `nan` export, but not for `-`.
pub fn is_blank_text(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan")
}
