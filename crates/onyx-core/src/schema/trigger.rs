use serde::Serialize;

/// A store-side trigger declared on an entity. Retained for diffing only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trigger {
    pub name: String,
    pub event: String,
    pub trigger: String,
}
