//! mockforce - an in-process CRM test double
//!
//! Emulates a Salesforce-style record store and a restricted SOQL dialect
//! (field selection, WHERE filtering, ORDER BY, LIMIT) so calling code can
//! be exercised without contacting a real remote service.

pub mod query;
pub mod schema;
pub mod store;
