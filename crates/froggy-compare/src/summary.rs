//! Outcome counts per field and overall.

use serde::Serialize;

use froggy_model::{FieldKind, Outcome};

use crate::comparator::ComparisonTable;

/// Number of rows per outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub exact: usize,
    #[serde(rename = "match")]
    pub matched: usize,
    pub overlap: usize,
    pub invalid: usize,
    pub unavailable: usize,
}

impl OutcomeCounts {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Exact => self.exact += 1,
            Outcome::Match => self.matched += 1,
            Outcome::Overlap => self.overlap += 1,
            Outcome::Invalid => self.invalid += 1,
            Outcome::Unavailable => self.unavailable += 1,
        }
    }

    pub fn get(&self, outcome: Outcome) -> usize {
        match outcome {
            Outcome::Exact => self.exact,
            Outcome::Match => self.matched,
            Outcome::Overlap => self.overlap,
            Outcome::Invalid => self.invalid,
            Outcome::Unavailable => self.unavailable,
        }
    }

    pub fn total(&self) -> usize {
        self.compared() + self.unavailable
    }

    /// Rows where both sides were valid.
    pub fn compared(&self) -> usize {
        self.agreed() + self.invalid
    }

    pub fn agreed(&self) -> usize {
        self.exact + self.matched + self.overlap
    }

    /// `agreed / compared`, or `None` when nothing was compared.
    pub fn agreement_rate(&self) -> Option<f64> {
        let compared = self.compared();
        (compared > 0).then(|| self.agreed() as f64 / compared as f64)
    }

    fn merge(&mut self, other: &OutcomeCounts) {
        self.exact += other.exact;
        self.matched += other.matched;
        self.overlap += other.overlap;
        self.invalid += other.invalid;
        self.unavailable += other.unavailable;
    }
}

/// Counts for a single field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSummary {
    pub field: String,
    pub kind: FieldKind,
    pub counts: OutcomeCounts,
}

/// Counts for every field of a comparison, plus totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSummary {
    pub identity_column: String,
    pub rows: usize,
    pub fields: Vec<FieldSummary>,
    pub totals: OutcomeCounts,
}

impl ComparisonSummary {
    pub fn from_table(table: &ComparisonTable) -> Self {
        let mut totals = OutcomeCounts::default();
        let fields: Vec<FieldSummary> = table
            .fields
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let mut counts = OutcomeCounts::default();
                for outcome in table.outcomes(index) {
                    counts.record(outcome);
                }
                totals.merge(&counts);
                FieldSummary {
                    field: spec.name.clone(),
                    kind: spec.kind,
                    counts,
                }
            })
            .collect();
        Self {
            identity_column: table.identity_column.clone(),
            rows: table.len(),
            fields,
            totals,
        }
    }

    pub fn agreement_rate(&self) -> Option<f64> {
        self.totals.agreement_rate()
    }
}
