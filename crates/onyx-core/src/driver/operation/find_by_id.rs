use super::*;

use crate::stmt::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct FindById {
    /// Entity to read from
    pub entity: String,

    /// Identifier value to look up
    pub id: Value,
}

impl From<FindById> for Operation {
    fn from(value: FindById) -> Self {
        Self::FindById(value)
    }
}
