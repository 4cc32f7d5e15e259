//! Query executor
//!
//! Executes parsed queries against a virtual instance, producing
//! deterministic results.
//!
//! Execution flow (strict order):
//! 1. Scan all records of the source object type, in insertion order
//! 2. Filter each record through the WHERE expression tree
//! 3. Sort survivors by the ORDER BY keys (stable; ties keep insertion order)
//! 4. Truncate to LIMIT
//! 5. Project the requested fields, in requested order

use tracing::debug;

use crate::store::VirtualInstance;

use super::ast::SoqlQuery;
use super::errors::{QueryError, QueryResult};
use super::evaluator::FilterEvaluator;
use super::result::{project, ProjectedRecord};
use super::sorter::RecordSorter;

/// Executes query ASTs against one virtual instance.
pub struct QueryExecutor<'a> {
    store: &'a VirtualInstance,
}

impl<'a> QueryExecutor<'a> {
    /// Creates an executor over the given instance.
    pub fn new(store: &'a VirtualInstance) -> Self {
        Self { store }
    }

    /// Executes a parsed query.
    ///
    /// Deterministic: the same query against the same records yields the
    /// same sequence. Each stage consumes its predecessor's full output;
    /// ORDER BY after filtering requires it.
    pub fn execute(&self, query: &SoqlQuery) -> QueryResult<Vec<ProjectedRecord>> {
        if self.store.options().strict_object_types
            && !self.store.has_object_type(&query.object_type)
        {
            return Err(QueryError::UnknownObjectType {
                name: query.object_type.clone(),
            });
        }

        // Steps 1-2: scan and filter
        let mut survivors: Vec<_> = self
            .store
            .scan(&query.object_type)
            .into_iter()
            .filter(|record| {
                query
                    .filter
                    .as_ref()
                    .map_or(true, |expr| FilterEvaluator::matches(expr, record))
            })
            .collect();

        // Step 3: sort
        if !query.order_by.is_empty() {
            RecordSorter::sort(&mut survivors, &query.order_by);
        }

        // Step 4: limit
        if let Some(limit) = query.limit {
            survivors.truncate(limit);
        }

        debug!(
            object_type = %query.object_type,
            returned = survivors.len(),
            "query executed"
        );

        // Step 5: project
        Ok(survivors
            .iter()
            .map(|record| project(record, &query.fields))
            .collect())
    }
}
