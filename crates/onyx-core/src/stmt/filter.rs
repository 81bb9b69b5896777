use super::Value;
use crate::driver::Row;

use std::fmt;

/// A fully bound predicate, ready to send to a store.
///
/// This is what a resolver's predicates become once `this.<attr>` references
/// are replaced by the current record's values and sub-queries are replaced
/// by the values they projected. It is always a conjunction of conditions;
/// an empty filter matches every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub conditions: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `field == value`
    Eq { field: String, value: Value },

    /// `field` is one of `values`
    In { field: String, values: Vec<Value> },
}

impl Filter {
    /// A filter matching every row.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and_eq(field, value)
    }

    pub fn in_list(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self::all().and_in(field, values)
    }

    pub fn and_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition::Eq {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn and_in(mut self, field: impl Into<String>, values: Vec<Value>) -> Self {
        self.conditions.push(Condition::In {
            field: field.into(),
            values,
        });
        self
    }

    pub fn push(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Returns `true` when no row can possibly match, i.e. some `In`
    /// condition has an empty value set.
    pub fn is_unsatisfiable(&self) -> bool {
        self.conditions
            .iter()
            .any(|condition| matches!(condition, Condition::In { values, .. } if values.is_empty()))
    }

    /// Evaluates the filter against a stored row.
    ///
    /// A field missing from the row compares as null.
    pub fn matches(&self, row: &Row) -> bool {
        self.conditions.iter().all(|condition| condition.matches(row))
    }
}

impl Condition {
    pub fn field(&self) -> &str {
        match self {
            Self::Eq { field, .. } | Self::In { field, .. } => field,
        }
    }

    pub fn matches(&self, row: &Row) -> bool {
        let actual = row.get(self.field()).unwrap_or(&serde_json::Value::Null);

        match self {
            Self::Eq { value, .. } => value.eq_json(actual),
            Self::In { values, .. } => values.iter().any(|value| value.eq_json(actual)),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conditions.is_empty() {
            return f.write_str("true");
        }

        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }
            fmt::Display::fmt(condition, f)?;
        }

        Ok(())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq { field, value } => write!(f, "{field} = {value}"),
            Self::In { field, values } => {
                write!(f, "{field} IN {}", Value::List(values.clone()))
            }
        }
    }
}
