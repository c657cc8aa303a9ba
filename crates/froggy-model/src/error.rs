use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("field '{field}': {reason}")]
    InvalidFieldSpec { field: String, reason: String },
    #[error("column '{column}' is used by both '{first}' and '{second}'")]
    DuplicateColumn {
        column: String,
        first: String,
        second: String,
    },
    #[error("failed to parse field specs: {0}")]
    FieldSpecParse(#[from] toml::de::Error),
    #[error("invalid transition '{value}': expected PREDICTED:REFERENCE integer codes")]
    InvalidTransition { value: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
