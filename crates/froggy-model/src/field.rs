//! Field specifications: which columns form a measured trait.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Shape of a measured trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// `(value, uncertainty)` read as `[value - uncertainty, value + uncertainty]`.
    ValueUncertainty,
    /// `(min, max)` read as `[min, max]`.
    MinMax,
    /// A single string or integer code.
    Categorical,
}

impl FieldKind {
    /// Number of input columns the kind consumes.
    pub fn column_count(&self) -> usize {
        match self {
            Self::ValueUncertainty | Self::MinMax => 2,
            Self::Categorical => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ValueUncertainty => "value ± uncertainty",
            Self::MinMax => "min / max",
            Self::Categorical => "categorical",
        }
    }
}

/// A named trait and the columns it is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub columns: Vec<String>,
}

impl FieldSpec {
    pub fn value_uncertainty(
        name: impl Into<String>,
        value_column: impl Into<String>,
        uncertainty_column: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::ValueUncertainty,
            columns: vec![value_column.into(), uncertainty_column.into()],
        }
    }

    pub fn min_max(
        name: impl Into<String>,
        min_column: impl Into<String>,
        max_column: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::MinMax,
            columns: vec![min_column.into(), max_column.into()],
        }
    }

    pub fn categorical(name: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Categorical,
            columns: vec![column.into()],
        }
    }

    /// Checks the column count matches the kind and no column name is blank.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ModelError::InvalidFieldSpec {
                field: self.name.clone(),
                reason: "name must not be empty".to_string(),
            });
        }
        let expected = self.kind.column_count();
        if self.columns.len() != expected {
            return Err(ModelError::InvalidFieldSpec {
                field: self.name.clone(),
                reason: format!(
                    "{} fields need {expected} column(s), found {}",
                    self.kind.label(),
                    self.columns.len()
                ),
            });
        }
        if self.columns.iter().any(|column| column.trim().is_empty()) {
            return Err(ModelError::InvalidFieldSpec {
                field: self.name.clone(),
                reason: "column names must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Validates every spec and rejects output columns claimed by two fields.
pub fn validate_field_specs(specs: &[FieldSpec]) -> Result<()> {
    let mut owners: BTreeMap<&str, &str> = BTreeMap::new();
    for spec in specs {
        spec.validate()?;
        for column in &spec.columns {
            if let Some(first) = owners.insert(column.as_str(), spec.name.as_str()) {
                return Err(ModelError::DuplicateColumn {
                    column: column.clone(),
                    first: first.to_string(),
                    second: spec.name.clone(),
                });
            }
        }
    }
    Ok(())
}

#[derive(Deserialize)]
struct FieldSpecDocument {
    #[serde(rename = "field", default)]
    fields: Vec<FieldSpec>,
}

/// Parses a TOML document of `[[field]]` tables.
///
/// ```toml
/// [[field]]
/// name = "SVL Male"
/// kind = "value_uncertainty"
/// columns = ["SVL Male (mm)", "+/- SVL Male (mm)"]
/// ```
pub fn parse_field_specs(source: &str) -> Result<Vec<FieldSpec>> {
    let document: FieldSpecDocument = toml::from_str(source)?;
    validate_field_specs(&document.fields)?;
    Ok(document.fields)
}
