use super::*;

use std::fmt;

/// A filter applied to a query pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Field equals a value
    Eq(PredicateEq),

    /// Field is one of a set of values
    In(PredicateIn),

    /// Every operand holds
    And(PredicateAnd),
}

impl Predicate {
    /// Pushes the `Eq` / `In` leaves of this predicate onto `out`.
    pub(crate) fn flatten_into<'a>(&'a self, out: &mut Vec<&'a Predicate>) {
        match self {
            Self::And(and) => {
                for operand in &and.operands {
                    operand.flatten_into(out);
                }
            }
            _ => out.push(self),
        }
    }

    /// Field a leaf predicate tests. `None` for conjunctions.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Eq(eq) => Some(&eq.field),
            Self::In(in_op) => Some(&in_op.field),
            Self::And(_) => None,
        }
    }

    /// Right-hand side of a leaf predicate. `None` for conjunctions.
    pub fn value_ref(&self) -> Option<&ValueRef> {
        match self {
            Self::Eq(eq) => Some(&eq.value),
            Self::In(in_op) => Some(&in_op.value),
            Self::And(_) => None,
        }
    }

    pub(crate) fn query_count(&self) -> usize {
        match self {
            Self::And(and) => and.operands.iter().map(Predicate::query_count).sum(),
            _ => self
                .value_ref()
                .and_then(ValueRef::as_query)
                .map(QueryExpr::query_count)
                .unwrap_or(0),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq(eq) => write!(f, "eq({:?}, {})", eq.field, eq.value),
            Self::In(in_op) => write!(f, "inOp({:?}, {})", in_op.field, in_op.value),
            Self::And(and) => {
                f.write_str("and(")?;
                for (i, operand) in and.operands.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    fmt::Display::fmt(operand, f)?;
                }
                f.write_str(")")
            }
        }
    }
}
