//! Projection of surviving records into result shape
//!
//! Result records mimic the emulated platform's query response: an
//! `attributes` object naming the record type, then exactly the requested
//! fields in requested order, with null for anything the record lacks.

use serde_json::{json, Map, Value};

use crate::store::Record;

/// A projected result record: field name to JSON value, in projection
/// order (the underlying map preserves insertion order).
pub type ProjectedRecord = Map<String, Value>;

/// Projects a record onto the requested field list.
pub fn project(record: &Record, fields: &[String]) -> ProjectedRecord {
    let mut out = Map::with_capacity(fields.len() + 1);
    out.insert(
        "attributes".to_string(),
        json!({
            "type": record.object_type(),
            "url": format!(
                "/services/data/v52.0/sobjects/{}/{}",
                record.object_type(),
                record.id()
            ),
        }),
    );
    for field in fields {
        let value = record.get(field).map_or(Value::Null, |v| v.to_json());
        out.insert(field.clone(), value);
    }
    out
}
