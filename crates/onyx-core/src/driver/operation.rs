mod delete;
pub use delete::Delete;

mod find_by_id;
pub use find_by_id::FindById;

mod query;
pub use query::Query;

mod save;
pub use save::Save;

use super::*;

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Delete the record with the given identifier
    Delete(Delete),

    /// Get a single record by its identifier
    FindById(FindById),

    /// Return every record matching a filter
    Query(Query),

    /// Insert or replace a record, keyed by its identifier
    Save(Save),
}

impl Operation {
    /// Name of the entity the operation targets.
    pub fn entity(&self) -> &str {
        match self {
            Self::Delete(op) => &op.entity,
            Self::FindById(op) => &op.entity,
            Self::Query(op) => &op.entity,
            Self::Save(op) => &op.entity,
        }
    }

    pub fn is_query(&self) -> bool {
        matches!(self, Self::Query(_))
    }

    pub fn as_query(&self) -> Option<&Query> {
        match self {
            Self::Query(op) => Some(op),
            _ => None,
        }
    }
}
