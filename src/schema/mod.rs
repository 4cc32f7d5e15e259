//! Schema/Field Resolver subsystem for mockforce
//!
//! Centralizes field typing: given an object type and field name, resolves
//! the field's declared or inferred value kind and coerces incoming values
//! to it.
//!
//! # Design Principles
//!
//! - Permissive resolution: unknown fields project as null, never error
//! - Implicit fields (`Id`, lookup `*Id` fields) resolve by convention
//! - Custom fields (`*__c`) are valid without declaration
//! - Coercion failures surface at insert time with full context

mod errors;
mod resolver;
mod types;

pub use errors::{SchemaError, SchemaResult};
pub use resolver::{SchemaResolver, CUSTOM_FIELD_SUFFIX};
pub use types::ValueKind;
