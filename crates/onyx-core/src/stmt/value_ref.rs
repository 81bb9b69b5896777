use super::*;

use std::fmt;

/// Right-hand side of a predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueRef {
    /// A constant written in the resolver
    Literal(Value),

    /// `this.<attr>`, bound to the record being resolved
    This(String),

    /// A projected sub-query, evaluated before the enclosing query
    Query(Box<QueryExpr>),
}

impl ValueRef {
    pub fn this(attr: impl Into<String>) -> Self {
        Self::This(attr.into())
    }

    pub fn as_query(&self) -> Option<&QueryExpr> {
        match self {
            Self::Query(query) => Some(query),
            _ => None,
        }
    }

    pub fn as_this(&self) -> Option<&str> {
        match self {
            Self::This(attr) => Some(attr),
            _ => None,
        }
    }
}

impl From<Value> for ValueRef {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl From<&str> for ValueRef {
    fn from(value: &str) -> Self {
        Self::Literal(value.into())
    }
}

impl From<i64> for ValueRef {
    fn from(value: i64) -> Self {
        Self::Literal(value.into())
    }
}

impl From<bool> for ValueRef {
    fn from(value: bool) -> Self {
        Self::Literal(value.into())
    }
}

impl From<QueryExpr> for ValueRef {
    fn from(value: QueryExpr) -> Self {
        Self::Query(Box::new(value))
    }
}

impl fmt::Display for ValueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => fmt::Display::fmt(value, f),
            Self::This(attr) => write!(f, "this.{attr}"),
            Self::Query(query) => fmt::Display::fmt(query, f),
        }
    }
}
