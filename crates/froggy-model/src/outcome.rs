//! Comparison outcomes and the cells written to the result table.

use std::fmt;

use froggy_common::{MISSING_SENTINEL, format_numeric};
use serde::{Deserialize, Serialize};

/// Per-field verdict for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Numeric sub-values are identical on both sides.
    Exact,
    /// Categorical values agree (or the transition rule accepts the pair).
    Match,
    /// Intervals differ but share at least one point.
    Overlap,
    /// Both sides are valid and disagree.
    Invalid,
    /// At least one required sub-value is missing or unparseable.
    Unavailable,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Match => "match",
            Self::Overlap => "overlap",
            Self::Invalid => "invalid",
            Self::Unavailable => "unavailable",
        }
    }

    /// True for outcomes counted as agreement in summaries.
    pub fn is_agreement(&self) -> bool {
        matches!(self, Self::Exact | Self::Match | Self::Overlap)
    }

    /// True when both sides were valid and actually compared.
    pub fn is_compared(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A cell of the comparison output table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum OutputCell {
    /// Agreed numeric value (the reference's raw value).
    Number(f64),
    /// Agreed categorical value.
    Text(String),
    Overlap,
    Invalid,
    Unavailable,
}

impl OutputCell {
    /// The token cell carried by every column of a non-exact field.
    pub fn token(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Overlap => Self::Overlap,
            Outcome::Invalid => Self::Invalid,
            Outcome::Exact | Outcome::Match | Outcome::Unavailable => Self::Unavailable,
        }
    }
}

impl fmt::Display for OutputCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => f.write_str(&format_numeric(*value)),
            Self::Text(text) => f.write_str(text),
            Self::Overlap => f.write_str("overlap"),
            Self::Invalid => f.write_str("invalid"),
            Self::Unavailable => f.write_str(MISSING_SENTINEL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_render_spreadsheet_tokens() {
        assert_eq!(OutputCell::Number(15.0).to_string(), "15");
        assert_eq!(OutputCell::Number(0.5).to_string(), "0.5");
        assert_eq!(OutputCell::Overlap.to_string(), "overlap");
        assert_eq!(OutputCell::Invalid.to_string(), "invalid");
        assert_eq!(OutputCell::Unavailable.to_string(), "-");
    }

    #[test]
    fn agreement_excludes_invalid_and_unavailable() {
        assert!(Outcome::Exact.is_agreement());
        assert!(Outcome::Overlap.is_agreement());
        assert!(!Outcome::Invalid.is_agreement());
        assert!(!Outcome::Unavailable.is_agreement());
        assert!(!Outcome::Unavailable.is_compared());
    }
}
