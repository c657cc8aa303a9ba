//! Built-in field lists for the frog trait spreadsheets.

use serde::{Deserialize, Serialize};

use crate::field::FieldSpec;
use crate::transition::TransitionRule;

/// Uncertainty columns that the curated sheet leaves blank when the value is exact.
pub const MORPHOLOGY_UNCERTAINTY_COLUMNS: &[&str] = &[
    "+/- SVL Male (mm)",
    "+/- SVL Female (mm)",
    "+/- SVL Adult (mm)",
    "+/- Egg Diameter (mm)",
];

/// Habitat category columns checked by the habitat comparison.
const HABITAT_COLUMNS: &[&str] = &[
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "13", "14", "15", "16",
];

/// Named field configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Body size, egg diameter and clutch size.
    Morphology,
    /// Altitude range, compared positionally.
    Altitude,
    /// Habitat category codes.
    Habitat,
    /// Egg style code, folded with confidence scores.
    EggStyle,
}

impl Preset {
    pub const fn all() -> &'static [Self] {
        &[Self::Morphology, Self::Altitude, Self::Habitat, Self::EggStyle]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Morphology => "morphology",
            Self::Altitude => "altitude",
            Self::Habitat => "habitat",
            Self::EggStyle => "egg-style",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Morphology => "Snout-vent length, egg diameter and clutch size",
            Self::Altitude => "Altitude range (row-aligned tables)",
            Self::Habitat => "Habitat category flags",
            Self::EggStyle => "Egg style code with extraction confidence",
        }
    }

    pub fn fields(&self) -> Vec<FieldSpec> {
        match self {
            Self::Morphology => vec![
                FieldSpec::value_uncertainty("SVL Male", "SVL Male (mm)", "+/- SVL Male (mm)"),
                FieldSpec::value_uncertainty(
                    "SVL Female",
                    "SVL Female (mm)",
                    "+/- SVL Female (mm)",
                ),
                FieldSpec::value_uncertainty(
                    "SVL Adult",
                    "Avg SVL Adult (mm)",
                    "+/- SVL Adult (mm)",
                ),
                FieldSpec::value_uncertainty(
                    "Egg Diameter",
                    "Avg Egg Diameter (mm)",
                    "+/- Egg Diameter (mm)",
                ),
                FieldSpec::min_max("Egg Clutch", "Min Egg Clutch", "Max Egg Clutch"),
            ],
            Self::Altitude => vec![FieldSpec::min_max(
                "Altitude",
                "Min Altitude",
                "Max Altitude",
            )],
            Self::Habitat => HABITAT_COLUMNS
                .iter()
                .map(|column| FieldSpec::categorical(format!("Habitat {column}"), *column))
                .collect(),
            Self::EggStyle => vec![FieldSpec::categorical("Egg Style", "Egg Style")],
        }
    }

    /// Default transition policy for integer-coded presets.
    ///
    /// Egg style predictions are 0/1 while the curated sheet uses 1/2 for the
    /// same categories.
    pub fn transition_rule(&self) -> Option<TransitionRule> {
        match self {
            Self::EggStyle => Some(TransitionRule::new([(0, 1), (1, 2)])),
            Self::Morphology | Self::Altitude | Self::Habitat => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldKind, validate_field_specs};

    #[test]
    fn presets_are_valid() {
        for preset in Preset::all() {
            validate_field_specs(&preset.fields()).unwrap();
        }
    }

    #[test]
    fn morphology_uncertainty_columns_belong_to_value_fields() {
        let fields = Preset::Morphology.fields();
        for column in MORPHOLOGY_UNCERTAINTY_COLUMNS {
            assert!(fields.iter().any(|field| {
                field.kind == FieldKind::ValueUncertainty && field.columns[1] == *column
            }));
        }
    }

    #[test]
    fn habitat_skips_codes_ten_to_twelve() {
        let fields = Preset::Habitat.fields();
        assert_eq!(fields.len(), 13);
        assert!(fields.iter().all(|field| field.columns[0] != "10"));
    }

    #[test]
    fn egg_style_rule_is_off_by_one() {
        let rule = Preset::EggStyle.transition_rule().unwrap();
        assert!(rule.is_correct(0, 1));
        assert!(rule.is_correct(1, 2));
        assert!(Preset::Morphology.transition_rule().is_none());
    }
}
