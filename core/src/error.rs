//! Error kinds reported by record definition, construction and introspection.

use thiserror::Error;

/// Errors that can occur while defining, instantiating or inspecting records.
///
/// All of these are caller input errors. None is retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Two fields of one shape share a name.
    #[error("Duplicate field '{field}' in shape {shape}")]
    DuplicateField { shape: String, field: String },

    /// A field without a default follows a field with a default.
    #[error("Field '{field}' without a default follows a defaulted field in shape {shape}")]
    DefaultOrdering { shape: String, field: String },

    /// A field name was empty.
    #[error("Empty field name in shape {shape}")]
    EmptyFieldName { shape: String },

    /// Reference to a field absent from the shape.
    #[error("Unknown field '{field}' on shape {shape}")]
    UnknownField { shape: String, field: String },

    /// A required field received no value.
    #[error("Missing value for field '{field}' of shape {shape}")]
    MissingValue { shape: String, field: String },

    /// A field was bound both positionally and by name.
    #[error("Field '{field}' of shape {shape} bound both positionally and by name")]
    DuplicateBinding { shape: String, field: String },

    /// More positional values than the shape has fields.
    #[error("Shape {shape} takes {expected} values, got {provided}")]
    TooManyValues {
        shape: String,
        expected: usize,
        provided: usize,
    },

    /// Metadata lookup for a key never attached to the field.
    #[error("Unknown metadata key '{key}' on field '{field}'")]
    UnknownMetadataKey { field: String, key: String },

    /// No shape is registered under this name.
    #[error("Unknown shape: {0}")]
    UnknownShape(String),
}

impl RecordError {
    pub fn duplicate_field(shape: impl Into<String>, field: impl Into<String>) -> Self {
        Self::DuplicateField {
            shape: shape.into(),
            field: field.into(),
        }
    }

    pub fn default_ordering(shape: impl Into<String>, field: impl Into<String>) -> Self {
        Self::DefaultOrdering {
            shape: shape.into(),
            field: field.into(),
        }
    }

    pub fn unknown_field(shape: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            shape: shape.into(),
            field: field.into(),
        }
    }

    pub fn missing_value(shape: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingValue {
            shape: shape.into(),
            field: field.into(),
        }
    }

    pub fn duplicate_binding(shape: impl Into<String>, field: impl Into<String>) -> Self {
        Self::DuplicateBinding {
            shape: shape.into(),
            field: field.into(),
        }
    }

    pub fn unknown_metadata_key(field: impl Into<String>, key: impl Into<String>) -> Self {
        Self::UnknownMetadataKey {
            field: field.into(),
            key: key.into(),
        }
    }
}

/// Result type for record operations.
pub type RecordResult<T> = Result<T, RecordError>;
