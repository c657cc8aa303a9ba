//! Accepted (predicted, reference) code pairs for integer-coded fields.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Caller-supplied policy deciding which predicted codes count as correct
/// for a given reference code.
///
/// The predicted and reference scales need not line up: the egg-style
/// extraction predicts on a two-level scale (0, 1) while the curated sheet
/// uses three levels (0, 1, 2).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransitionRule {
    pairs: BTreeSet<(i64, i64)>,
}

impl TransitionRule {
    pub fn new(pairs: impl IntoIterator<Item = (i64, i64)>) -> Self {
        Self {
            pairs: pairs.into_iter().collect(),
        }
    }

    pub fn is_correct(&self, predicted: i64, reference: i64) -> bool {
        self.pairs.contains(&(predicted, reference))
    }

    /// Parses a single `PREDICTED:REFERENCE` pair, e.g. `0:1`.
    pub fn parse_pair(value: &str) -> Result<(i64, i64), ModelError> {
        let invalid = || ModelError::InvalidTransition {
            value: value.to_string(),
        };
        let (predicted, reference) = value.split_once(':').ok_or_else(invalid)?;
        let predicted = predicted.trim().parse::<i64>().map_err(|_| invalid())?;
        let reference = reference.trim().parse::<i64>().map_err(|_| invalid())?;
        Ok((predicted, reference))
    }
}

impl FromStr for TransitionRule {
    type Err = ModelError;

    /// Parses a comma-separated list of pairs, e.g. `0:1,1:2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(Self::parse_pair)
            .collect::<Result<BTreeSet<_>, _>>()
            .map(|pairs| Self { pairs })
    }
}

impl fmt::Display for TransitionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .pairs
            .iter()
            .map(|(predicted, reference)| format!("{predicted}:{reference}"))
            .collect();
        f.write_str(&parts.join(","))
    }
}
