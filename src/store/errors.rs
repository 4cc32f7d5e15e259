//! Store error types

use thiserror::Error;

use crate::schema::SchemaError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by record store operations.
///
/// Bulk operations capture these per item; a failed item never aborts its
/// siblings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// A supplied field value could not be coerced to its resolved kind.
    #[error(transparent)]
    Validation(#[from] SchemaError),

    /// No record with the given identifier exists for the object type.
    #[error("no {object_type} record with id '{id}'")]
    NotFound { object_type: String, id: String },

    /// The supplied record body was not a JSON object.
    #[error("{object_type} record body must be a JSON object, got {got}")]
    NotAnObject { object_type: String, got: String },
}

impl StoreError {
    /// Creates a not-found error.
    pub fn not_found(object_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            object_type: object_type.into(),
            id: id.into(),
        }
    }

    /// Creates a malformed-body error.
    pub fn not_an_object(object_type: impl Into<String>, got: impl Into<String>) -> Self {
        Self::NotAnObject {
            object_type: object_type.into(),
            got: got.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display_names_object_and_id() {
        let err = StoreError::not_found("Lead", "abc123");
        let msg = err.to_string();
        assert!(msg.contains("Lead"));
        assert!(msg.contains("abc123"));
    }
}
