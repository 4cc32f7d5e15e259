//! Schema error types

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised during field resolution and value coercion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// A value could not be coerced to the field's resolved kind.
    #[error("invalid value for {object_type}.{field}: {value} is not a valid {expected}")]
    InvalidValue {
        object_type: String,
        field: String,
        value: String,
        expected: &'static str,
    },
}

impl SchemaError {
    /// Creates an invalid-value error with full context.
    pub fn invalid_value(
        object_type: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        Self::InvalidValue {
            object_type: object_type.into(),
            field: field.into(),
            value: value.into(),
            expected,
        }
    }
}
