use crate::stmt::Type;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: Type,

    #[serde(rename = "isNullable")]
    pub nullable: bool,
}

impl Attribute {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: false,
        }
    }

    pub fn nullable(name: impl Into<String>, ty: Type) -> Self {
        Self {
            nullable: true,
            ..Self::new(name, ty)
        }
    }
}
