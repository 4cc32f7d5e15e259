//! Stable sorting of filtered records
//!
//! Sort keys apply in priority order; records equal under every key keep
//! their insertion order (the sort is stable and the input arrives in
//! insertion order).

use std::cmp::Ordering;

use crate::store::{FieldValue, Record};

use super::ast::{OrderKey, SortDirection};

/// Sorts records for ORDER BY.
pub struct RecordSorter;

impl RecordSorter {
    /// Sorts records by the given keys. A record's missing or null key
    /// value sorts before any present value ascending.
    pub fn sort(records: &mut [Record], keys: &[OrderKey]) {
        records.sort_by(|a, b| {
            for key in keys {
                let ordering = Self::compare_values(a.get(&key.field), b.get(&key.field));
                let ordering = match key.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });
    }

    /// Compares two field values for sorting.
    ///
    /// Ordering rules: null < boolean < number < string; within a kind,
    /// natural ordering. References order with strings.
    fn compare_values(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
        let rank = |v: Option<&FieldValue>| -> u8 {
            match v {
                None | Some(FieldValue::Null) => 0,
                Some(FieldValue::Boolean(_)) => 1,
                Some(FieldValue::Number(_)) => 2,
                Some(FieldValue::Text(_)) | Some(FieldValue::Reference(_)) => 3,
            }
        };

        let (a_rank, b_rank) = (rank(a), rank(b));
        if a_rank != b_rank {
            return a_rank.cmp(&b_rank);
        }

        match (a, b) {
            (Some(FieldValue::Boolean(x)), Some(FieldValue::Boolean(y))) => x.cmp(y),
            (Some(FieldValue::Number(x)), Some(FieldValue::Number(y))) => {
                x.partial_cmp(y).unwrap_or(Ordering::Equal)
            }
            (
                Some(FieldValue::Text(x) | FieldValue::Reference(x)),
                Some(FieldValue::Text(y) | FieldValue::Reference(y)),
            ) => x.cmp(y),
            _ => Ordering::Equal,
        }
    }
}
