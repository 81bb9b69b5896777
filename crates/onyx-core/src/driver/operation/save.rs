use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Save {
    /// Entity to write to
    pub entity: String,

    /// Full row, identifier included. Replaces any stored row with the same
    /// identifier.
    pub row: Row,
}

impl From<Save> for Operation {
    fn from(value: Save) -> Self {
        Self::Save(value)
    }
}
