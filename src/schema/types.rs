//! Field kind definitions
//!
//! Every stored field resolves to one of these kinds. Unknown is not an
//! error state: the emulated platform is permissive about undeclared
//! fields, projecting them as null.

use serde::{Deserialize, Serialize};

/// The resolved kind of a field's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// UTF-8 text
    String,
    /// 64-bit floating point (covers the platform's integer fields too)
    Number,
    /// Boolean
    Boolean,
    /// Identifier string referencing another record
    Reference,
    /// Never declared and never observed; projects as null
    Unknown,
}

impl ValueKind {
    /// Returns the kind name for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Reference => "reference",
            ValueKind::Unknown => "unknown",
        }
    }
}
