//! Query subsystem for mockforce
//!
//! Parses the restricted SOQL dialect and evaluates it against a virtual
//! instance's record store.
//!
//! # Execution Flow (strict order)
//!
//! 1. Tokenize and parse the query text into an AST
//! 2. Scan all records of the source object type
//! 3. Filter through the WHERE expression tree (platform null semantics)
//! 4. Sort by ORDER BY keys, stable, insertion-order ties
//! 5. Truncate to LIMIT
//! 6. Project requested fields in requested order
//!
//! # Invariants
//!
//! - Parse errors abort before any store access
//! - Evaluation never errors on absent data; it degrades to null
//! - Same query + same records = same result sequence

mod ast;
mod errors;
mod evaluator;
mod executor;
mod lexer;
mod parser;
mod result;
mod sorter;

pub use ast::{CmpOp, FilterExpr, Literal, OrderKey, SoqlQuery, SortDirection};
pub use errors::{QueryError, QueryResult};
pub use evaluator::FilterEvaluator;
pub use executor::QueryExecutor;
pub use parser::parse;
pub use result::{project, ProjectedRecord};
pub use sorter::RecordSorter;
