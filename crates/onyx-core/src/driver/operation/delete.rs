use super::*;

use crate::stmt::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    /// Entity to delete from
    pub entity: String,

    /// Identifier value of the record to delete
    pub id: Value,
}

impl From<Delete> for Operation {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
