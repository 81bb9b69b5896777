use super::{Entity, Result, Schema};
use crate::Error;

use std::collections::HashSet;

struct Verify<'a> {
    schema: &'a Schema,
}

impl Schema {
    pub(super) fn verify(&self) -> Result<()> {
        Verify { schema: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        for entity in self.schema.entities() {
            self.verify_entity_name(entity)?;
            self.verify_attribute_names_are_unique(entity)?;
            self.verify_identifier_is_an_attribute(entity)?;
            self.verify_resolver_names(entity)?;
        }

        Ok(())
    }

    fn verify_entity_name(&self, entity: &Entity) -> Result<()> {
        if entity.name.trim().is_empty() {
            return Err(Error::invalid_schema("entity with an empty name"));
        }

        Ok(())
    }

    fn verify_attribute_names_are_unique(&self, entity: &Entity) -> Result<()> {
        let mut names = HashSet::new();

        for attr in &entity.attributes {
            if !names.insert(attr.name.as_str()) {
                return Err(Error::invalid_schema(format!(
                    "duplicate attribute `{}` on entity `{}`",
                    attr.name, entity.name
                )));
            }
        }

        Ok(())
    }

    fn verify_identifier_is_an_attribute(&self, entity: &Entity) -> Result<()> {
        let Some(attr) = entity.identifier_attribute() else {
            return Err(Error::invalid_schema(format!(
                "identifier `{}` of entity `{}` is not one of its attributes",
                entity.identifier.name, entity.name
            )));
        };

        if attr.ty != entity.identifier.ty {
            return Err(Error::invalid_schema(format!(
                "identifier `{}` of entity `{}` is declared as {} but the attribute is {}",
                entity.identifier.name, entity.name, entity.identifier.ty, attr.ty
            )));
        }

        Ok(())
    }

    fn verify_resolver_names(&self, entity: &Entity) -> Result<()> {
        let mut names = HashSet::new();

        for resolver in &entity.resolvers {
            if !names.insert(resolver.name.as_str()) {
                return Err(Error::invalid_schema(format!(
                    "duplicate resolver `{}` on entity `{}`",
                    resolver.name, entity.name
                )));
            }

            if entity.has_attribute(&resolver.name) {
                return Err(Error::invalid_schema(format!(
                    "resolver `{}` on entity `{}` shadows an attribute",
                    resolver.name, entity.name
                )));
            }
        }

        Ok(())
    }
}
