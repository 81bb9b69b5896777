use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct PredicateEq {
    pub field: String,
    pub value: ValueRef,
}

impl Predicate {
    pub fn eq(field: impl Into<String>, value: impl Into<ValueRef>) -> Self {
        PredicateEq {
            field: field.into(),
            value: value.into(),
        }
        .into()
    }
}

impl From<PredicateEq> for Predicate {
    fn from(value: PredicateEq) -> Self {
        Self::Eq(value)
    }
}
