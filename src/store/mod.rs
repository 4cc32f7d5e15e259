//! Record Store subsystem for mockforce
//!
//! Holds per-object-type collections of records keyed by store-generated
//! identifiers, with insert, bulk insert, lookup, scan, update, and delete.
//!
//! # Invariants
//!
//! - Identifiers are never reused within one instance's lifetime
//! - Scans return live records in insertion order
//! - Within one object type, every record exposes the same field name set
//!   (absent fields materialize as null)
//! - The query path never mutates records

mod errors;
mod identity;
mod instance;
mod record;

pub use errors::{StoreError, StoreResult};
pub use identity::{IdGenerator, ID_LENGTH};
pub use instance::{InstanceOptions, VirtualInstance};
pub use record::{FieldValue, Record, ID_FIELD};
