//! Filter evaluation against a single record
//!
//! Evaluation is side-effect-free and deterministic. Internally three-valued
//! (ordering against null is Unknown), collapsed to include/exclude at the
//! top. Null handling follows the emulated platform, not standard SQL:
//! `= null` means "is absent", `!= null` means "is present".

use std::cmp::Ordering;

use crate::store::{FieldValue, Record};

use super::ast::{CmpOp, FilterExpr, Literal};

/// Three-valued evaluation result, collapsed to a boolean at the top of
/// the expression tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Truth {
    True,
    False,
    Unknown,
}

impl Truth {
    fn from_bool(value: bool) -> Self {
        if value {
            Truth::True
        } else {
            Truth::False
        }
    }

    /// Kleene AND
    fn and(self, other: Truth) -> Truth {
        match (self, other) {
            (Truth::False, _) | (_, Truth::False) => Truth::False,
            (Truth::True, Truth::True) => Truth::True,
            _ => Truth::Unknown,
        }
    }

    /// Kleene OR
    fn or(self, other: Truth) -> Truth {
        match (self, other) {
            (Truth::True, _) | (_, Truth::True) => Truth::True,
            (Truth::False, Truth::False) => Truth::False,
            _ => Truth::Unknown,
        }
    }

    /// Collapses to include/exclude: only a definite True includes.
    fn include(self) -> bool {
        self == Truth::True
    }
}

/// Evaluates filter expression trees against records.
pub struct FilterEvaluator;

impl FilterEvaluator {
    /// Returns true if the record satisfies the expression.
    ///
    /// Never errors: unknown fields evaluate as null, and ordering
    /// comparisons against null exclude rather than fail.
    pub fn matches(expr: &FilterExpr, record: &Record) -> bool {
        Self::evaluate(expr, record).include()
    }

    fn evaluate(expr: &FilterExpr, record: &Record) -> Truth {
        match expr {
            FilterExpr::Comparison { field, op, value } => {
                Self::compare(record.get(field), *op, value)
            }
            FilterExpr::And(left, right) => {
                Self::evaluate(left, record).and(Self::evaluate(right, record))
            }
            FilterExpr::Or(left, right) => {
                Self::evaluate(left, record).or(Self::evaluate(right, record))
            }
            FilterExpr::Group(inner) => Self::evaluate(inner, record),
        }
    }

    fn compare(actual: Option<&FieldValue>, op: CmpOp, literal: &Literal) -> Truth {
        let actual_is_null = actual.map_or(true, FieldValue::is_null);

        if matches!(literal, Literal::Null) {
            return match op {
                // Platform semantics: presence checks, not SQL unknown
                CmpOp::Eq => Truth::from_bool(actual_is_null),
                CmpOp::Ne => Truth::from_bool(!actual_is_null),
                _ => Truth::Unknown,
            };
        }

        if actual_is_null {
            return match op {
                CmpOp::Eq => Truth::False,
                // A null field differs from any non-null literal
                CmpOp::Ne => Truth::True,
                _ => Truth::Unknown,
            };
        }

        let actual = actual.unwrap_or(&FieldValue::Null);
        match op {
            CmpOp::Eq => Truth::from_bool(Self::equal(actual, literal)),
            CmpOp::Ne => Truth::from_bool(!Self::equal(actual, literal)),
            CmpOp::Lt => Truth::from_bool(Self::order(actual, literal) == Ordering::Less),
            CmpOp::Le => Truth::from_bool(Self::order(actual, literal) != Ordering::Greater),
            CmpOp::Gt => Truth::from_bool(Self::order(actual, literal) == Ordering::Greater),
            CmpOp::Ge => Truth::from_bool(Self::order(actual, literal) != Ordering::Less),
        }
    }

    /// Value equality: numbers numerically, otherwise within-kind only.
    fn equal(actual: &FieldValue, literal: &Literal) -> bool {
        match (actual, literal) {
            (FieldValue::Number(a), Literal::Number(b)) => a == b,
            (FieldValue::Boolean(a), Literal::Boolean(b)) => a == b,
            (FieldValue::Text(a) | FieldValue::Reference(a), Literal::Text(b)) => a == b,
            _ => false,
        }
    }

    /// Ordering: numeric when both operands are numbers, otherwise ordinal
    /// on string forms.
    fn order(actual: &FieldValue, literal: &Literal) -> Ordering {
        if let (Some(a), Literal::Number(b)) = (actual.as_number(), literal) {
            return a.partial_cmp(b).unwrap_or(Ordering::Equal);
        }
        let literal_form = match literal {
            Literal::Null => String::new(),
            Literal::Boolean(b) => b.to_string(),
            Literal::Number(n) => n.to_string(),
            Literal::Text(s) => s.clone(),
        };
        actual.ordinal_form().cmp(&literal_form)
    }
}
