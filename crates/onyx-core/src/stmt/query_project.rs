use super::*;

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct QueryProject {
    /// A terminated pipeline producing the rows to project
    pub source: Box<QueryExpr>,

    /// Column (or resolver) whose values make up the projection
    pub field: String,
}

impl QueryExpr {
    /// Projects the rows of this pipeline onto `field`.
    pub fn values(self, field: impl Into<String>) -> Self {
        QueryProject {
            source: Box::new(self),
            field: field.into(),
        }
        .into()
    }
}

impl From<QueryProject> for QueryExpr {
    fn from(value: QueryProject) -> Self {
        Self::Project(value)
    }
}

impl fmt::Display for QueryProject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.values('{}')", self.source, self.field)
    }
}
