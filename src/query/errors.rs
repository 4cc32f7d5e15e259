//! Query error types
//!
//! Parse-time errors abort the whole query before any store access; the
//! evaluator itself never errors, it degrades missing data to null.

use thiserror::Error;

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised by the query subsystem.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// The query text does not match the supported grammar.
    #[error("syntax error at position {position}: {message} (near '{fragment}')")]
    Syntax {
        /// Byte offset of the offending token in the query text
        position: usize,
        /// The offending fragment, or "end of input"
        fragment: String,
        message: String,
    },

    /// The FROM clause names a never-seen object type (strict mode only).
    #[error("unknown object type '{name}'")]
    UnknownObjectType { name: String },
}

impl QueryError {
    /// Creates a syntax error at a token position.
    pub fn syntax(
        position: usize,
        fragment: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Syntax {
            position,
            fragment: fragment.into(),
            message: message.into(),
        }
    }

    /// Creates a syntax error at end of input.
    pub fn unexpected_end(position: usize, message: impl Into<String>) -> Self {
        Self::syntax(position, "end of input", message)
    }
}
