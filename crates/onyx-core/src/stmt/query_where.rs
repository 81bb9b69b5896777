use super::*;

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct QueryWhere {
    pub source: Box<QueryExpr>,
    pub predicate: Predicate,
}

impl QueryExpr {
    /// Narrows this pipeline by `predicate`.
    pub fn filter(self, predicate: impl Into<Predicate>) -> Self {
        QueryWhere {
            source: Box::new(self),
            predicate: predicate.into(),
        }
        .into()
    }
}

impl From<QueryWhere> for QueryExpr {
    fn from(value: QueryWhere) -> Self {
        Self::Where(value)
    }
}

impl fmt::Display for QueryWhere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.where({})", self.source, self.predicate)
    }
}
