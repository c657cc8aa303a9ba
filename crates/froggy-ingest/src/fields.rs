use std::path::Path;

use froggy_model::{FieldSpec, parse_field_specs};

use crate::error::{IngestError, Result};

/// Loads field specs from a TOML file of `[[field]]` tables.
pub fn load_field_specs(path: &Path) -> Result<Vec<FieldSpec>> {
    let source = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    let specs = parse_field_specs(&source).map_err(|source| IngestError::FieldSpecs {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), fields = specs.len(), "loaded field specs");
    Ok(specs)
}
