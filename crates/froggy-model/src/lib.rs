//! Data model for cross-verifying species trait tables.
//!
//! A [`RecordTable`] holds one row per species keyed by name. [`FieldSpec`]s
//! describe which columns form a measured trait, and the comparator reports a
//! per-field [`Outcome`] with the [`OutputCell`]s written to the result table.

pub mod error;
pub mod field;
pub mod outcome;
pub mod presets;
pub mod record;
pub mod transition;
pub mod value;

pub use error::{ModelError, Result};
pub use field::{FieldKind, FieldSpec, parse_field_specs, validate_field_specs};
pub use outcome::{Outcome, OutputCell};
pub use presets::{MORPHOLOGY_UNCERTAINTY_COLUMNS, Preset};
pub use record::{Record, RecordTable};
pub use transition::TransitionRule;
pub use value::CellValue;
