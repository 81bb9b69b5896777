mod attribute;
pub use attribute::Attribute;

pub mod diff;
pub use diff::SchemaDiff;

pub mod document;
pub use document::SchemaDocument;

mod entity;
pub use entity::Entity;

mod identifier;
pub use identifier::{Generator, Identifier};

mod index;
pub use index::Index;

mod resolver;
pub use resolver::ResolverDef;

mod trigger;
pub use trigger::Trigger;

mod verify;

use crate::{Error, Result};

use indexmap::IndexMap;

/// The full set of entities a database declares.
///
/// Loaded once, verified, and shared read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    /// Database the schema was published for, when known
    pub database_id: Option<String>,

    /// Free-form note attached to the schema revision
    pub revision_description: Option<String>,

    entities: IndexMap<String, Entity>,
}

impl Schema {
    /// Builds a schema from entity definitions, verifying every invariant.
    pub fn from_entities(entities: impl IntoIterator<Item = Entity>) -> Result<Schema> {
        let mut map = IndexMap::new();

        for entity in entities {
            if map.contains_key(&entity.name) {
                return Err(Error::invalid_schema(format!(
                    "duplicate entity `{}`",
                    entity.name
                )));
            }
            map.insert(entity.name.clone(), entity);
        }

        let schema = Schema {
            database_id: None,
            revision_description: None,
            entities: map,
        };
        schema.verify()?;
        Ok(schema)
    }

    /// Parses and verifies a JSON schema document.
    pub fn from_json(src: &str) -> Result<Schema> {
        let document: SchemaDocument = serde_json::from_str(src)
            .map_err(|err| Error::invalid_schema(format!("cannot parse schema document: {err}")))?;
        Schema::from_document(document)
    }

    /// Reads, parses and verifies a JSON schema document from disk.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Schema> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|err| {
            Error::invalid_schema(format!("cannot read `{}`: {err}", path.display()))
        })?;
        Schema::from_json(&src)
    }

    pub fn from_document(document: SchemaDocument) -> Result<Schema> {
        let database_id = document.database_id.clone();
        let revision_description = document.revision_description.clone();

        let entities = document
            .into_tables()
            .into_iter()
            .map(Entity::from_document)
            .collect::<Result<Vec<_>>>()?;

        let mut schema = Schema::from_entities(entities)?;
        schema.database_id = database_id;
        schema.revision_description = revision_description;
        Ok(schema)
    }

    pub fn to_document(&self) -> SchemaDocument {
        SchemaDocument {
            database_id: self.database_id.clone(),
            revision_description: self.revision_description.clone(),
            tables: self.entities().map(Entity::to_document).collect(),
            entities: vec![],
            meta: None,
        }
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    /// Like [`Schema::entity`], failing with an unknown entity error.
    pub fn expect_entity(&self, name: &str) -> Result<&Entity> {
        self.entity(name)
            .ok_or_else(|| Error::unknown_entity(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    pub fn entities(&self) -> impl ExactSizeIterator<Item = &Entity> {
        self.entities.values()
    }

    /// Total number of resolvers declared across all entities.
    pub fn resolver_count(&self) -> usize {
        self.entities().map(|entity| entity.resolvers.len()).sum()
    }
}
