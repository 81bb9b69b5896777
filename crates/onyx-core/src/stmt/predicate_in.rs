use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct PredicateIn {
    pub field: String,

    /// Either a literal list, a `this.<attr>` holding a list, or a projected
    /// sub-query.
    pub value: ValueRef,
}

impl Predicate {
    pub fn in_op(field: impl Into<String>, value: impl Into<ValueRef>) -> Self {
        PredicateIn {
            field: field.into(),
            value: value.into(),
        }
        .into()
    }
}

impl From<PredicateIn> for Predicate {
    fn from(value: PredicateIn) -> Self {
        Self::In(value)
    }
}
