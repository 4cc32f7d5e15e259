//! Query AST structures
//!
//! The parser's output: a transient tree created per query string and
//! discarded after execution. The filter node set is closed so the
//! evaluator can match exhaustively.

/// Comparison operators supported in WHERE clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpOp {
    /// Returns the operator's source form.
    pub fn as_str(&self) -> &'static str {
        match self {
            CmpOp::Eq => "=",
            CmpOp::Ne => "!=",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
        }
    }

    /// Returns true for the ordering operators (`<`, `<=`, `>`, `>=`).
    pub fn is_ordering(&self) -> bool {
        matches!(self, CmpOp::Lt | CmpOp::Le | CmpOp::Gt | CmpOp::Ge)
    }
}

/// A literal on the right-hand side of a comparison.
///
/// `Null` is the reserved null literal, distinct from the string 'null'.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Boolean(bool),
    Number(f64),
    Text(String),
}

/// A node of the parsed WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// field op literal
    Comparison {
        field: String,
        op: CmpOp,
        value: Literal,
    },
    /// Both sides must hold
    And(Box<FilterExpr>, Box<FilterExpr>),
    /// Either side must hold
    Or(Box<FilterExpr>, Box<FilterExpr>),
    /// Explicit parentheses
    Group(Box<FilterExpr>),
}

impl FilterExpr {
    /// Creates a comparison node.
    pub fn comparison(field: impl Into<String>, op: CmpOp, value: Literal) -> Self {
        FilterExpr::Comparison {
            field: field.into(),
            op,
            value,
        }
    }

    /// Creates an AND node.
    pub fn and(left: FilterExpr, right: FilterExpr) -> Self {
        FilterExpr::And(Box::new(left), Box::new(right))
    }

    /// Creates an OR node.
    pub fn or(left: FilterExpr, right: FilterExpr) -> Self {
        FilterExpr::Or(Box::new(left), Box::new(right))
    }

    /// Creates a parenthesized group node.
    pub fn group(inner: FilterExpr) -> Self {
        FilterExpr::Group(Box::new(inner))
    }
}

/// Sort direction for an ORDER BY key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One ORDER BY key; multiple keys apply in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderKey {
    pub field: String,
    pub direction: SortDirection,
}

impl OrderKey {
    /// Creates an ascending key.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Creates a descending key.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// A parsed query: projection, source, optional filter, ordering, limit.
#[derive(Debug, Clone, PartialEq)]
pub struct SoqlQuery {
    /// Projected field names, in requested order (no duplicates)
    pub fields: Vec<String>,
    /// Source object type name
    pub object_type: String,
    /// Optional WHERE expression tree
    pub filter: Option<FilterExpr>,
    /// ORDER BY keys, empty when absent
    pub order_by: Vec<OrderKey>,
    /// Optional LIMIT (non-negative; 0 is valid and yields no records)
    pub limit: Option<usize>,
}
