use super::{
    document::{
        AttributeDocument, IdentifierDocument, IndexDocument, ResolverDocument, TableDocument,
        TriggerDocument,
    },
    Attribute, Generator, Identifier, Index, ResolverDef, Trigger,
};
use crate::{stmt::Type, Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Name of the entity, unique within the schema
    pub name: String,

    /// Storage kind, e.g. `SEARCHABLE`
    pub kind: Option<String>,

    /// Partition attribute, empty when the entity is not partitioned
    pub partition: String,

    /// Declared attributes, in declaration order
    pub attributes: Vec<Attribute>,

    pub identifier: Identifier,

    pub resolvers: Vec<ResolverDef>,

    pub indexes: Vec<Index>,

    pub triggers: Vec<Trigger>,
}

impl Entity {
    /// Creates an entity holding only its identifier attribute.
    pub fn new(name: impl Into<String>, identifier: Identifier) -> Self {
        let id_attr = Attribute::new(identifier.name.clone(), identifier.ty);

        Self {
            name: name.into(),
            kind: None,
            partition: String::new(),
            attributes: vec![id_attr],
            identifier,
            resolvers: vec![],
            indexes: vec![],
            triggers: vec![],
        }
    }

    /// Adds `attribute`, replacing any attribute already declared under the
    /// same name.
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        match self.attributes.iter_mut().find(|attr| attr.name == attribute.name) {
            Some(existing) => *existing = attribute,
            None => self.attributes.push(attribute),
        }
        self
    }

    pub fn with_resolver(
        mut self,
        name: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        self.resolvers.push(ResolverDef::new(name, expression));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    pub fn resolver(&self, name: &str) -> Option<&ResolverDef> {
        self.resolvers.iter().find(|resolver| resolver.name == name)
    }

    pub fn has_resolver(&self, name: &str) -> bool {
        self.resolver(name).is_some()
    }

    /// The attribute backing the identifier.
    ///
    /// Verified schemas always have one.
    pub fn identifier_attribute(&self) -> Option<&Attribute> {
        self.attribute(&self.identifier.name)
    }

    /// Attributes in field order for generated record types: the identifier
    /// first, then required attributes, then nullable ones. Declaration
    /// order is kept within each group.
    pub fn ordered_attributes(&self) -> Vec<&Attribute> {
        let weight = |attr: &Attribute| {
            if attr.name == self.identifier.name {
                0
            } else if !attr.nullable {
                1
            } else {
                2
            }
        };

        let mut attrs = self.attributes.iter().collect::<Vec<_>>();
        attrs.sort_by_key(|attr| weight(attr));
        attrs
    }

    pub(super) fn from_document(table: TableDocument) -> Result<Entity> {
        let context = |err: Error| err.context(err!("entity `{}`", table.name));

        let attributes = table
            .attributes
            .iter()
            .filter(|attr| !attr.name.is_empty())
            .map(|attr| {
                Ok(Attribute {
                    name: attr.name.clone(),
                    ty: parse_type(&attr.name, &attr.ty)?,
                    nullable: attr.is_nullable,
                })
            })
            .collect::<Result<Vec<_>>>()
            .map_err(context)?;

        let Some(identifier) = &table.identifier else {
            return Err(Error::invalid_schema(format!(
                "entity `{}` has no identifier",
                table.name
            )));
        };

        let identifier = Identifier {
            name: identifier.name.clone(),
            ty: parse_type(&identifier.name, &identifier.ty).map_err(context)?,
            generator: Generator::from_schema_name(&identifier.generator).map_err(context)?,
        };

        Ok(Entity {
            name: table.name,
            kind: table.kind,
            partition: table.partition.trim().to_string(),
            attributes,
            identifier,
            resolvers: table
                .resolvers
                .into_iter()
                .map(|resolver| ResolverDef::new(resolver.name, resolver.expression))
                .collect(),
            indexes: table
                .indexes
                .into_iter()
                .map(|index| Index {
                    name: index.name,
                    ty: index.ty,
                    minimum_score: index.minimum_score,
                })
                .collect(),
            triggers: table
                .triggers
                .into_iter()
                .map(|trigger| Trigger {
                    name: trigger.name,
                    event: trigger.event,
                    trigger: trigger.trigger,
                })
                .collect(),
        })
    }

    pub(super) fn to_document(&self) -> TableDocument {
        TableDocument {
            name: self.name.clone(),
            kind: self.kind.clone(),
            partition: self.partition.clone(),
            identifier: Some(IdentifierDocument {
                name: self.identifier.name.clone(),
                ty: self.identifier.ty.name().to_string(),
                generator: self.identifier.generator.name().to_string(),
            }),
            attributes: self
                .attributes
                .iter()
                .map(|attr| AttributeDocument {
                    name: attr.name.clone(),
                    ty: attr.ty.name().to_string(),
                    is_nullable: attr.nullable,
                })
                .collect(),
            indexes: self
                .indexes
                .iter()
                .map(|index| IndexDocument {
                    name: index.name.clone(),
                    ty: index.ty.clone(),
                    minimum_score: index.minimum_score,
                })
                .collect(),
            resolvers: self
                .resolvers
                .iter()
                .map(|resolver| ResolverDocument {
                    name: resolver.name.clone(),
                    expression: resolver.expression.clone(),
                })
                .collect(),
            triggers: self
                .triggers
                .iter()
                .map(|trigger| TriggerDocument {
                    name: trigger.name.clone(),
                    event: trigger.event.clone(),
                    trigger: trigger.trigger.clone(),
                })
                .collect(),
        }
    }
}

fn parse_type(attribute: &str, name: &str) -> Result<Type> {
    Type::from_schema_name(name).ok_or_else(|| {
        Error::invalid_schema(format!(
            "attribute `{attribute}` has unknown type `{name}`"
        ))
    })
}
