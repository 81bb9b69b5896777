use super::*;

use crate::stmt::Filter;

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Entity to query
    pub entity: String,

    /// Conjunction every returned row satisfies
    pub filter: Filter,

    /// Maximum number of rows to return
    pub limit: Option<usize>,
}

impl From<Query> for Operation {
    fn from(value: Query) -> Self {
        Self::Query(value)
    }
}
