//! Record and field value types
//!
//! Field values use a closed tagged representation rather than raw JSON so
//! the evaluator and sorter can match exhaustively on value kind.

use serde::Serialize;
use serde_json::Value;

/// The identifier field implicitly present on every record.
pub const ID_FIELD: &str = "Id";

/// A single field value as stored.
///
/// Reference values are identifier strings (the `Id` field and lookup
/// fields); they serialize identically to text but sort and compare as
/// opaque tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Boolean(bool),
    Number(f64),
    Text(String),
    Reference(String),
}

impl FieldValue {
    /// Returns true for the null value.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Returns the numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string content for text and reference values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) | FieldValue::Reference(s) => Some(s),
            _ => None,
        }
    }

    /// Renders the value as its ordinal string form, used for lexicographic
    /// comparison when operands are not both numeric.
    pub fn ordinal_form(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Boolean(b) => b.to_string(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) | FieldValue::Reference(s) => s.clone(),
        }
    }

    /// Converts the value into its JSON representation.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Boolean(b) => Value::Bool(*b),
            FieldValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FieldValue::Text(s) | FieldValue::Reference(s) => Value::String(s.clone()),
        }
    }
}

/// A materialized record: identifier plus the full field set of its object
/// type, in the type's field order (absent fields carry `Null`).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    object_type: String,
    id: String,
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    /// Creates a materialized record. `fields` must already include the
    /// identifier field.
    pub(crate) fn new(
        object_type: impl Into<String>,
        id: impl Into<String>,
        fields: Vec<(String, FieldValue)>,
    ) -> Self {
        Self {
            object_type: object_type.into(),
            id: id.into(),
            fields,
        }
    }

    /// Returns the record's object type name.
    pub fn object_type(&self) -> &str {
        &self.object_type
    }

    /// Returns the record's identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Looks up a field value by name.
    ///
    /// Returns `None` for fields the object type has never seen; callers
    /// treat that the same as an explicit `Null`.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Iterates fields in the object type's field order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}
