use super::*;

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFrom {
    /// Entity to read rows from
    pub entity: String,
}

impl QueryExpr {
    pub fn from_entity(entity: impl Into<String>) -> Self {
        QueryFrom {
            entity: entity.into(),
        }
        .into()
    }
}

impl From<QueryFrom> for QueryExpr {
    fn from(value: QueryFrom) -> Self {
        Self::From(value)
    }
}

impl fmt::Display for QueryFrom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "db.from({:?})", self.entity)
    }
}
