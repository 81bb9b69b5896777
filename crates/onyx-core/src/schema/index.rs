use serde::Serialize;

/// A search index declared on an entity. Retained for diffing only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Index {
    pub name: String,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_score: Option<f64>,
}

impl Index {
    /// The index type, with an unset type read as `DEFAULT`.
    pub fn effective_ty(&self) -> &str {
        match self.ty.as_deref() {
            None | Some("") => "DEFAULT",
            Some(ty) => ty,
        }
    }
}
