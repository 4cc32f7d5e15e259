//! The virtual instance: per-object-type record collections
//!
//! One `VirtualInstance` is one emulated org: process-local mutable state,
//! single logical caller, no internal locking. Independent instances never
//! interact, so tests can hold as many as they like.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::query::{self, ProjectedRecord, QueryError, QueryExecutor};
use crate::schema::{SchemaResolver, ValueKind};

use super::errors::{StoreError, StoreResult};
use super::identity::IdGenerator;
use super::record::{FieldValue, Record, ID_FIELD};

/// Behavior toggles for a virtual instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstanceOptions {
    /// Reject queries against never-seen object types instead of treating
    /// them as empty.
    pub strict_object_types: bool,
}

impl InstanceOptions {
    /// Options with strict object-type checking enabled.
    pub fn strict() -> Self {
        Self {
            strict_object_types: true,
        }
    }
}

/// One stored record, sparse: only the fields the caller supplied.
///
/// The full field set of the object type is materialized at read time, so a
/// field introduced by a later insert shows up as null on earlier records.
#[derive(Debug)]
struct StoredRecord {
    id: String,
    fields: HashMap<String, FieldValue>,
    deleted: bool,
}

/// A named collection of records sharing a field schema.
#[derive(Debug, Default)]
struct ObjectCollection {
    /// Field names in first-seen order, excluding the identifier.
    field_order: Vec<String>,
    /// Records in insertion order; deletes leave tombstones so insertion
    /// order stays stable for scans.
    records: Vec<StoredRecord>,
    by_id: HashMap<String, usize>,
}

impl ObjectCollection {
    fn note_field(&mut self, name: &str) {
        if name != ID_FIELD && !self.field_order.iter().any(|f| f == name) {
            self.field_order.push(name.to_string());
        }
    }

    fn materialize(&self, object_type: &str, stored: &StoredRecord) -> Record {
        let mut fields = Vec::with_capacity(self.field_order.len() + 1);
        fields.push((
            ID_FIELD.to_string(),
            FieldValue::Reference(stored.id.clone()),
        ));
        for name in &self.field_order {
            let value = stored.fields.get(name).cloned().unwrap_or(FieldValue::Null);
            fields.push((name.clone(), value));
        }
        Record::new(object_type, stored.id.clone(), fields)
    }
}

/// An in-memory emulated org: record storage plus the query entry point.
#[derive(Debug, Default)]
pub struct VirtualInstance {
    objects: HashMap<String, ObjectCollection>,
    resolver: SchemaResolver,
    ids: IdGenerator,
    options: InstanceOptions,
}

impl VirtualInstance {
    /// Creates a fresh, empty instance with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fresh, empty instance with the given options.
    pub fn with_options(options: InstanceOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Returns this instance's options.
    pub fn options(&self) -> InstanceOptions {
        self.options
    }

    /// Pre-declares an object type and its field kinds.
    ///
    /// Declared kinds make insert-time validation strict for those fields;
    /// everything else is still inferred on first insert.
    pub fn declare_object<I, S>(&mut self, object_type: &str, fields: I)
    where
        I: IntoIterator<Item = (S, ValueKind)>,
        S: Into<String>,
    {
        self.objects.entry(object_type.to_string()).or_default();
        for (field, kind) in fields {
            self.resolver.declare(object_type, field, kind);
        }
    }

    /// Returns true if the object type has been declared or inserted into.
    pub fn has_object_type(&self, object_type: &str) -> bool {
        self.objects.contains_key(object_type)
    }

    /// Inserts a record, assigning it a fresh identifier.
    ///
    /// `body` must be a JSON object of field values. A caller-supplied `Id`
    /// is ignored; identifiers are always store-generated. Coercion
    /// failures abort the insert before any state changes.
    pub fn insert(&mut self, object_type: &str, body: Value) -> StoreResult<Record> {
        let coerced = self.coerce_body(object_type, &body)?;

        let collection = self.objects.entry(object_type.to_string()).or_default();
        let id = self.ids.next_id();
        let mut fields = HashMap::with_capacity(coerced.len());
        for (name, value) in coerced {
            collection.note_field(&name);
            self.resolver.observe(object_type, &name, &value);
            fields.insert(name, value);
        }

        let stored = StoredRecord {
            id: id.clone(),
            fields,
            deleted: false,
        };
        let record = collection.materialize(object_type, &stored);
        collection.by_id.insert(id.clone(), collection.records.len());
        collection.records.push(stored);

        debug!(object_type, id = %id, "record inserted");
        Ok(record)
    }

    /// Inserts each element independently, in input order.
    ///
    /// One outcome per input: a malformed element fails alone and never
    /// aborts its siblings.
    pub fn bulk_insert(
        &mut self,
        object_type: &str,
        bodies: Vec<Value>,
    ) -> Vec<StoreResult<Record>> {
        bodies
            .into_iter()
            .map(|body| self.insert(object_type, body))
            .collect()
    }

    /// Looks up a record by identifier.
    pub fn get(&self, object_type: &str, id: &str) -> StoreResult<Record> {
        let collection = self
            .objects
            .get(object_type)
            .ok_or_else(|| StoreError::not_found(object_type, id))?;
        let index = *collection
            .by_id
            .get(id)
            .ok_or_else(|| StoreError::not_found(object_type, id))?;
        let stored = &collection.records[index];
        if stored.deleted {
            return Err(StoreError::not_found(object_type, id));
        }
        Ok(collection.materialize(object_type, stored))
    }

    /// Returns all live records of the object type, in insertion order.
    ///
    /// An unknown object type scans as empty.
    pub fn scan(&self, object_type: &str) -> Vec<Record> {
        match self.objects.get(object_type) {
            Some(collection) => collection
                .records
                .iter()
                .filter(|r| !r.deleted)
                .map(|r| collection.materialize(object_type, r))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Replaces the named fields of an existing record.
    ///
    /// The query path never mutates records; updates come only through
    /// here and replace whole field values.
    pub fn update(&mut self, object_type: &str, id: &str, body: Value) -> StoreResult<Record> {
        let coerced = self.coerce_body(object_type, &body)?;

        let collection = self
            .objects
            .get_mut(object_type)
            .ok_or_else(|| StoreError::not_found(object_type, id))?;
        let index = *collection
            .by_id
            .get(id)
            .ok_or_else(|| StoreError::not_found(object_type, id))?;
        if collection.records[index].deleted {
            return Err(StoreError::not_found(object_type, id));
        }

        for (name, value) in coerced {
            collection.note_field(&name);
            self.resolver.observe(object_type, &name, &value);
            collection.records[index].fields.insert(name, value);
        }

        debug!(object_type, id, "record updated");
        let stored = &collection.records[index];
        Ok(collection.materialize(object_type, stored))
    }

    /// Deletes a record by identifier.
    pub fn delete(&mut self, object_type: &str, id: &str) -> StoreResult<()> {
        let collection = self
            .objects
            .get_mut(object_type)
            .ok_or_else(|| StoreError::not_found(object_type, id))?;
        let index = collection
            .by_id
            .remove(id)
            .ok_or_else(|| StoreError::not_found(object_type, id))?;
        collection.records[index].deleted = true;
        debug!(object_type, id, "record deleted");
        Ok(())
    }

    /// Parses and executes a query against this instance.
    ///
    /// The sole read entry point for query access: returns the ordered
    /// sequence of projected records, or a syntax error distinct from
    /// "zero results".
    pub fn query(&self, soql: &str) -> Result<Vec<ProjectedRecord>, QueryError> {
        let parsed = query::parse(soql)?;
        QueryExecutor::new(self).execute(&parsed)
    }

    /// Coerces a JSON body into field values, without touching state.
    fn coerce_body(
        &self,
        object_type: &str,
        body: &Value,
    ) -> StoreResult<Vec<(String, FieldValue)>> {
        let map = body
            .as_object()
            .ok_or_else(|| StoreError::not_an_object(object_type, value_kind_name(body)))?;
        let mut coerced = Vec::with_capacity(map.len());
        for (name, value) in map {
            if name == ID_FIELD {
                continue; // identifiers are store-generated
            }
            let field_value = self.resolver.coerce(object_type, name, value)?;
            coerced.push((name.clone(), field_value));
        }
        Ok(coerced)
    }
}

fn value_kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
