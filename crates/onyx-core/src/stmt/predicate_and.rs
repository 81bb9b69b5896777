use super::*;

use std::ops;

#[derive(Debug, Clone, PartialEq)]
pub struct PredicateAnd {
    pub operands: Vec<Predicate>,
}

impl Predicate {
    pub fn and(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        let mut lhs = lhs.into();
        let rhs = rhs.into();

        match (&mut lhs, rhs) {
            (Self::And(lhs_and), Self::And(rhs_and)) => {
                lhs_and.operands.extend(rhs_and.operands);
                lhs
            }
            (Self::And(lhs_and), rhs) => {
                lhs_and.operands.push(rhs);
                lhs
            }
            (_, Self::And(mut rhs_and)) => {
                rhs_and.operands.insert(0, lhs);
                rhs_and.into()
            }
            (_, rhs) => PredicateAnd {
                operands: vec![lhs, rhs],
            }
            .into(),
        }
    }
}

impl ops::Deref for PredicateAnd {
    type Target = [Predicate];

    fn deref(&self) -> &Self::Target {
        self.operands.deref()
    }
}

impl<'a> IntoIterator for &'a PredicateAnd {
    type IntoIter = std::slice::Iter<'a, Predicate>;
    type Item = &'a Predicate;

    fn into_iter(self) -> Self::IntoIter {
        self.operands.iter()
    }
}

impl From<PredicateAnd> for Predicate {
    fn from(value: PredicateAnd) -> Self {
        Self::And(value)
    }
}
