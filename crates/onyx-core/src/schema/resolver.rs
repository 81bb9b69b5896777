use serde::Serialize;

/// A named, computed relationship field declared on an entity.
///
/// The expression is kept as written; it is compiled into a
/// [`QueryExpr`](crate::stmt::QueryExpr) by the runtime when the schema is
/// loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolverDef {
    pub name: String,

    #[serde(rename = "resolver")]
    pub expression: String,
}

impl ResolverDef {
    pub fn new(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expression: expression.into(),
        }
    }
}
