//! Wire format of a schema document.
//!
//! ```json
//! {
//!   "databaseId": "...",
//!   "tables": [{
//!     "name": "Role",
//!     "identifier": {"name": "id", "type": "String", "generator": "None"},
//!     "attributes": [{"name": "id", "type": "String", "isNullable": false}],
//!     "resolvers": [{"name": "permissions", "resolver": "db.from(...)..."}]
//!   }]
//! }
//! ```
//!
//! Older documents list their tables under `entities`; both keys are read.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_description: Option<String>,

    #[serde(default)]
    pub tables: Vec<TableDocument>,

    /// Legacy name for `tables`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<TableDocument>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<MetaDocument>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDocument {
    pub name: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default)]
    pub partition: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<IdentifierDocument>,

    #[serde(default)]
    pub attributes: Vec<AttributeDocument>,

    #[serde(default)]
    pub indexes: Vec<IndexDocument>,

    #[serde(default)]
    pub resolvers: Vec<ResolverDocument>,

    #[serde(default)]
    pub triggers: Vec<TriggerDocument>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierDocument {
    #[serde(default)]
    pub name: String,

    #[serde(rename = "type", default)]
    pub ty: String,

    #[serde(default)]
    pub generator: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDocument {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default)]
    pub is_nullable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDocument {
    pub name: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolverDocument {
    pub name: String,

    #[serde(rename = "resolver", alias = "expression")]
    pub expression: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriggerDocument {
    pub name: String,

    #[serde(default)]
    pub event: String,

    #[serde(default)]
    pub trigger: String,
}

impl SchemaDocument {
    /// Returns the document's tables, falling back to the legacy `entities`
    /// list when `tables` is empty.
    pub fn into_tables(self) -> Vec<TableDocument> {
        if self.tables.is_empty() {
            self.entities
        } else {
            self.tables
        }
    }
}
