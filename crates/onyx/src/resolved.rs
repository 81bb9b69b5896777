use crate::Record;

use onyx_core::stmt::Value;
use std::sync::Arc;

/// The value a resolver produced for one record.
///
/// Records are shared, so a memoized value handed out twice points at the
/// very same records.
#[derive(Debug, Clone, Default)]
pub enum Resolved {
    /// `firstOrNull()` matched nothing
    #[default]
    Null,

    /// Result of a `firstOrNull()` resolver
    One(Arc<Record>),

    /// Result of a `list()` resolver
    Many(Vec<Arc<Record>>),
}

impl Resolved {
    pub fn is_null(&self) -> bool {
        matches!(self, Resolved::Null)
    }

    pub fn as_one(&self) -> Option<&Arc<Record>> {
        match self {
            Resolved::One(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_many(&self) -> Option<&[Arc<Record>]> {
        match self {
            Resolved::Many(records) => Some(records),
            _ => None,
        }
    }

    /// Every resolved record; empty for `Null`.
    pub fn records(&self) -> &[Arc<Record>] {
        match self {
            Resolved::Null => &[],
            Resolved::One(record) => std::slice::from_ref(record),
            Resolved::Many(records) => records,
        }
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    /// Identifiers of the resolved records, in result order.
    pub fn ids(&self) -> Vec<Value> {
        self.records()
            .iter()
            .map(|record| record.id().clone())
            .collect()
    }

    /// Returns `true` if both values hold the same shared records.
    pub fn ptr_eq(&self, other: &Resolved) -> bool {
        match (self, other) {
            (Resolved::Null, Resolved::Null) => true,
            (Resolved::One(a), Resolved::One(b)) => Arc::ptr_eq(a, b),
            (Resolved::Many(a), Resolved::Many(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(a, b)| Arc::ptr_eq(a, b))
            }
            _ => false,
        }
    }
}
