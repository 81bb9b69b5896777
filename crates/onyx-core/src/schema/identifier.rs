use crate::{stmt::Type, Error, Result};

use serde::Serialize;
use std::fmt;

/// The attribute acting as an entity's primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identifier {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: Type,

    pub generator: Generator,
}

/// How identifier values come into existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Generator {
    /// The caller supplies the identifier
    #[default]
    None,

    /// A random v4 UUID is generated on save
    Uuid,

    /// The store assigns the next value of a sequence
    Sequence,
}

impl Identifier {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            generator: Generator::None,
        }
    }

    pub fn with_generator(mut self, generator: Generator) -> Self {
        self.generator = generator;
        self
    }
}

impl Generator {
    pub fn from_schema_name(name: &str) -> Result<Generator> {
        match name {
            "" | "None" => Ok(Generator::None),
            "UUID" => Ok(Generator::Uuid),
            "Sequence" => Ok(Generator::Sequence),
            other => Err(Error::invalid_schema(format!(
                "unknown identifier generator `{other}`"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Generator::None => "None",
            Generator::Uuid => "UUID",
            Generator::Sequence => "Sequence",
        }
    }

    pub fn is_none(self) -> bool {
        matches!(self, Generator::None)
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Generator {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
