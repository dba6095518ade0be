use crate::fields::{FieldKind, FieldName};

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("form is read-only")]
    ReadOnly,
    #[error("field {field} expects a {expected} value")]
    FieldKindMismatch { field: FieldName, expected: FieldKind },
    #[error("invalid value for {field}: {reason}")]
    InvalidFieldValue { field: FieldName, reason: String },
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("unknown section: {0}")]
    UnknownSection(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type FormResult<T> = std::result::Result<T, FormError>;

/// Failure reported by a save operation.
///
/// Save failures never become validation errors; the submission controller logs them and
/// hands them back to the caller.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("save rejected: {0}")]
    Rejected(String),
    #[error("failed to write clinical history: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize clinical history: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize clinical history: {0}")]
    Deserialization(serde_json::Error),
    #[error("stored clinical history belongs to patient {found}, expected {expected}")]
    PatientMismatch {
        expected: physio_types::PatientId,
        found: physio_types::PatientId,
    },
}

pub type SaveResult<T> = std::result::Result<T, SaveError>;
