use std::fmt;

/// Declared type of an entity attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    String,
    Int,
    Double,
    Boolean,
    Timestamp,
    EmbeddedObject,
}

impl Type {
    /// Parses a schema type name.
    ///
    /// Besides the canonical names, the wider numeric and temporal names a
    /// schema may carry are folded onto the closest value representation.
    pub fn from_schema_name(name: &str) -> Option<Type> {
        Some(match name {
            "String" | "Character" => Type::String,
            "Int" | "Long" | "Short" | "Byte" => Type::Int,
            "Double" | "Float" => Type::Double,
            "Boolean" => Type::Boolean,
            "Timestamp" | "Date" => Type::Timestamp,
            "EmbeddedObject" => Type::EmbeddedObject,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Type::String => "String",
            Type::Int => "Int",
            Type::Double => "Double",
            Type::Boolean => "Boolean",
            Type::Timestamp => "Timestamp",
            Type::EmbeddedObject => "EmbeddedObject",
        }
    }

    pub fn is_string(self) -> bool {
        matches!(self, Type::String)
    }

    pub fn is_timestamp(self) -> bool {
        matches!(self, Type::Timestamp)
    }
}

impl serde::Serialize for Type {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
