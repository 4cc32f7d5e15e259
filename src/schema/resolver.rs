//! Field kind resolution and value coercion
//!
//! Resolution order: implicit fields by naming convention, explicit
//! declarations, kinds inferred from previously stored values, then
//! Unknown. Unknown fields never raise an error; the platform projects
//! undeclared fields as null.

use std::collections::HashMap;

use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};
use super::types::ValueKind;
use crate::store::FieldValue;

/// Suffix marking custom fields, valid without prior declaration.
pub const CUSTOM_FIELD_SUFFIX: &str = "__c";

/// Resolves field kinds per object type, from declarations and from values
/// observed at insert time.
#[derive(Debug, Default)]
pub struct SchemaResolver {
    declared: HashMap<String, HashMap<String, ValueKind>>,
    inferred: HashMap<String, HashMap<String, ValueKind>>,
}

impl SchemaResolver {
    /// Creates an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-declares a field's kind for an object type.
    ///
    /// Declarations win over inference and make insert-time validation
    /// strict for that field.
    pub fn declare(
        &mut self,
        object_type: impl Into<String>,
        field: impl Into<String>,
        kind: ValueKind,
    ) {
        self.declared
            .entry(object_type.into())
            .or_default()
            .insert(field.into(), kind);
    }

    /// Resolves the kind of a field.
    ///
    /// The identifier field and conventionally-suffixed lookup fields
    /// (`*Id`) are references without declaration; custom fields (`*__c`)
    /// and anything never seen resolve to Unknown rather than erroring.
    pub fn resolve(&self, object_type: &str, field: &str) -> ValueKind {
        if field == crate::store::ID_FIELD || field.ends_with("Id") {
            return ValueKind::Reference;
        }
        if let Some(kind) = self.declared.get(object_type).and_then(|m| m.get(field)) {
            return *kind;
        }
        if let Some(kind) = self.inferred.get(object_type).and_then(|m| m.get(field)) {
            return *kind;
        }
        ValueKind::Unknown
    }

    /// Returns true for custom fields by naming convention.
    pub fn is_custom(field: &str) -> bool {
        field.ends_with(CUSTOM_FIELD_SUFFIX)
    }

    /// Records the kind of a stored value so later inserts validate
    /// against it. Nulls carry no kind and are ignored.
    pub fn observe(&mut self, object_type: &str, field: &str, value: &FieldValue) {
        let kind = match value {
            FieldValue::Null => return,
            FieldValue::Boolean(_) => ValueKind::Boolean,
            FieldValue::Number(_) => ValueKind::Number,
            FieldValue::Text(_) => ValueKind::String,
            FieldValue::Reference(_) => ValueKind::Reference,
        };
        self.inferred
            .entry(object_type.to_string())
            .or_default()
            .entry(field.to_string())
            .or_insert(kind);
    }

    /// Coerces a supplied JSON value to the field's resolved kind.
    ///
    /// Nulls pass through for every kind. Numeric text coerces to a
    /// declared number; non-numeric text does not.
    pub fn coerce(
        &self,
        object_type: &str,
        field: &str,
        value: &Value,
    ) -> SchemaResult<FieldValue> {
        let kind = self.resolve(object_type, field);
        if value.is_null() {
            return Ok(FieldValue::Null);
        }
        match kind {
            ValueKind::String => match value {
                Value::String(s) => Ok(FieldValue::Text(s.clone())),
                Value::Number(n) => Ok(FieldValue::Text(n.to_string())),
                Value::Bool(b) => Ok(FieldValue::Text(b.to_string())),
                _ => Err(self.invalid(object_type, field, value, "string")),
            },
            ValueKind::Number => match value {
                Value::Number(n) => Ok(FieldValue::Number(n.as_f64().unwrap_or(0.0))),
                Value::String(s) => s
                    .trim()
                    .parse::<f64>()
                    .map(FieldValue::Number)
                    .map_err(|_| self.invalid(object_type, field, value, "number")),
                _ => Err(self.invalid(object_type, field, value, "number")),
            },
            ValueKind::Boolean => match value {
                Value::Bool(b) => Ok(FieldValue::Boolean(*b)),
                Value::String(s) if s.eq_ignore_ascii_case("true") => {
                    Ok(FieldValue::Boolean(true))
                }
                Value::String(s) if s.eq_ignore_ascii_case("false") => {
                    Ok(FieldValue::Boolean(false))
                }
                _ => Err(self.invalid(object_type, field, value, "boolean")),
            },
            ValueKind::Reference => match value {
                Value::String(s) => Ok(FieldValue::Reference(s.clone())),
                _ => Err(self.invalid(object_type, field, value, "reference")),
            },
            ValueKind::Unknown => match value {
                Value::Bool(b) => Ok(FieldValue::Boolean(*b)),
                Value::Number(n) => Ok(FieldValue::Number(n.as_f64().unwrap_or(0.0))),
                Value::String(s) => Ok(FieldValue::Text(s.clone())),
                _ => Err(self.invalid(object_type, field, value, "scalar")),
            },
        }
    }

    fn invalid(
        &self,
        object_type: &str,
        field: &str,
        value: &Value,
        expected: &'static str,
    ) -> SchemaError {
        SchemaError::invalid_value(object_type, field, value.to_string(), expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_implicit_fields_resolve_as_reference() {
        let resolver = SchemaResolver::new();
        assert_eq!(resolver.resolve("Lead", "Id"), ValueKind::Reference);
        assert_eq!(resolver.resolve("Contact", "OwnerId"), ValueKind::Reference);
        assert_eq!(resolver.resolve("Contact", "AccountId"), ValueKind::Reference);
    }

    #[test]
    fn test_unknown_field_resolves_without_error() {
        let resolver = SchemaResolver::new();
        assert_eq!(resolver.resolve("Lead", "NeverSeen"), ValueKind::Unknown);
        assert_eq!(resolver.resolve("Lead", "Score__c"), ValueKind::Unknown);
        assert!(SchemaResolver::is_custom("Score__c"));
        assert!(!SchemaResolver::is_custom("Score"));
    }

    #[test]
    fn test_declaration_wins_over_inference() {
        let mut resolver = SchemaResolver::new();
        resolver.declare("Lead", "Score__c", ValueKind::Number);
        resolver.observe("Lead", "Score__c", &FieldValue::Text("oops".into()));
        assert_eq!(resolver.resolve("Lead", "Score__c"), ValueKind::Number);
    }

    #[test]
    fn test_inference_from_first_observed_value() {
        let mut resolver = SchemaResolver::new();
        resolver.observe("Account", "AlexaRanking__c", &FieldValue::Number(1.0));
        assert_eq!(
            resolver.resolve("Account", "AlexaRanking__c"),
            ValueKind::Number
        );
        // First observation is sticky
        resolver.observe("Account", "AlexaRanking__c", &FieldValue::Text("x".into()));
        assert_eq!(
            resolver.resolve("Account", "AlexaRanking__c"),
            ValueKind::Number
        );
    }

    #[test]
    fn test_coerce_numeric_text_to_declared_number() {
        let mut resolver = SchemaResolver::new();
        resolver.declare("Lead", "Score__c", ValueKind::Number);
        assert_eq!(
            resolver.coerce("Lead", "Score__c", &json!("100")).unwrap(),
            FieldValue::Number(100.0)
        );
        let err = resolver.coerce("Lead", "Score__c", &json!("a lot")).unwrap_err();
        assert!(err.to_string().contains("Lead.Score__c"));
    }

    #[test]
    fn test_coerce_null_passes_for_every_kind() {
        let mut resolver = SchemaResolver::new();
        resolver.declare("Lead", "Score__c", ValueKind::Number);
        assert_eq!(
            resolver.coerce("Lead", "Score__c", &Value::Null).unwrap(),
            FieldValue::Null
        );
        assert_eq!(
            resolver.coerce("Lead", "Anything", &Value::Null).unwrap(),
            FieldValue::Null
        );
    }

    #[test]
    fn test_coerce_rejects_composite_values() {
        let resolver = SchemaResolver::new();
        assert!(resolver.coerce("Lead", "Tags", &json!(["a", "b"])).is_err());
        assert!(resolver.coerce("Lead", "Extra", &json!({"k": 1})).is_err());
    }

    #[test]
    fn test_coerce_infers_scalar_kinds_for_unknown_fields() {
        let resolver = SchemaResolver::new();
        assert_eq!(
            resolver.coerce("Lead", "Name", &json!("Jim")).unwrap(),
            FieldValue::Text("Jim".into())
        );
        assert_eq!(
            resolver.coerce("Lead", "Score__c", &json!(7)).unwrap(),
            FieldValue::Number(7.0)
        );
        assert_eq!(
            resolver.coerce("Lead", "IsActive__c", &json!(true)).unwrap(),
            FieldValue::Boolean(true)
        );
    }
}
