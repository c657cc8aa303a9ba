use std::borrow::Cow;
use std::fmt;

use froggy_common::{
    MISSING_SENTINEL, format_numeric, is_blank_text, is_missing_text, parse_finite_f64,
};
use serde::{Deserialize, Serialize};

/// A single raw cell from an input table.
///
/// Unavailable cells come in two kinds. `Blank` is an empty cell or NaN and
/// may be back-filled; `Missing` is the explicit `-` sentinel and never is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    #[default]
    Blank,
    Missing,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Builds a cell from raw spreadsheet text.
    pub fn from_text(raw: &str) -> Self {
        if is_blank_text(raw) {
            Self::Blank
        } else if is_missing_text(raw) {
            Self::Missing
        } else {
            Self::Text(raw.trim().to_string())
        }
    }

    /// Builds a cell from a number; NaN becomes `Blank`.
    pub fn from_number(value: f64) -> Self {
        if value.is_nan() {
            Self::Blank
        } else {
            Self::Number(value)
        }
    }

    /// True for both kinds of unavailable cell.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Blank | Self::Missing)
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }

    /// The finite numeric value of this cell, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Blank | Self::Missing => None,
            Self::Number(value) => Some(*value).filter(|v| v.is_finite()),
            Self::Text(text) => parse_finite_f64(text),
        }
    }

    /// The trimmed, non-sentinel text of this cell, if it has any.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Blank | Self::Missing => None,
            Self::Number(value) if value.is_nan() => None,
            Self::Number(value) => Some(Cow::Owned(format_numeric(*value))),
            Self::Text(text) if is_missing_text(text) => None,
            Self::Text(text) => Some(Cow::Borrowed(text.trim())),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::from_number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::from_text(value)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => Ok(()),
            Self::Missing => f.write_str(MISSING_SENTINEL),
            Self::Number(value) => f.write_str(&format_numeric(*value)),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_text_is_missing() {
        assert_eq!(CellValue::from_text("-"), CellValue::Missing);
        assert_eq!(CellValue::from_text(" "), CellValue::Blank);
        assert_eq!(CellValue::from_text("nan"), CellValue::Blank);
        assert_eq!(CellValue::from(f64::NAN), CellValue::Blank);
        assert!(CellValue::Blank.is_missing());
        assert!(!CellValue::Missing.is_blank());
    }

    #[test]
    fn numeric_text_parses_lazily() {
        let cell = CellValue::from_text(" 21.5 ");
        assert_eq!(cell, CellValue::Text("21.5".to_string()));
        assert_eq!(cell.as_number(), Some(21.5));
        assert_eq!(CellValue::from_text("approx. 20").as_number(), None);
        assert_eq!(CellValue::Text("inf".to_string()).as_number(), None);
    }

    #[test]
    fn text_view_trims_and_formats() {
        assert_eq!(CellValue::Number(2.0).as_text().as_deref(), Some("2"));
        assert_eq!(
            CellValue::Text("  Arboreal ".to_string()).as_text().as_deref(),
            Some("Arboreal")
        );
        assert_eq!(CellValue::Text(" - ".to_string()).as_text(), None);
        assert_eq!(CellValue::Missing.as_text(), None);
    }

    #[test]
    fn display_uses_sentinel_for_missing() {
        assert_eq!(CellValue::Missing.to_string(), "-");
        assert_eq!(CellValue::Blank.to_string(), "");
        assert_eq!(CellValue::Number(15.0).to_string(), "15");
    }
}
