mod materialize;
pub(crate) use materialize::normalize;

use crate::{Db, Resolved};

use indexmap::IndexMap;
use onyx_core::{driver::Row, stmt::Value, Error, Result};
use serde_json::{Map, Value as Json};
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

/// A typed record of a schema entity.
///
/// Declared attributes are coerced to their schema types when the record is
/// materialized. Keys the schema does not declare are kept untouched as
/// extension fields.
///
/// Each record memoizes the values its resolvers produce. The memo is local
/// to the record instance; two records loaded for the same identifier do not
/// share resolved values.
#[derive(Debug)]
pub struct Record {
    entity: String,

    id: Value,

    attributes: IndexMap<String, Value>,

    extra: Map<String, Json>,

    resolved: Mutex<HashMap<String, Resolved>>,
}

/// A field read through [`Record::get_field`].
#[derive(Debug, Clone)]
pub enum Field<'a> {
    Attribute(&'a Value),
    Extra(&'a Json),
    Resolved(Resolved),
}

impl Record {
    /// Name of the entity this record belongs to.
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Value of the identifier attribute.
    pub fn id(&self) -> &Value {
        &self.id
    }

    /// Returns a declared attribute. Nullable attributes that were absent
    /// are present with a null value.
    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.attributes.get(attribute)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Returns an extension field, a key not declared by the schema.
    pub fn extra(&self, key: &str) -> Option<&Json> {
        self.extra.get(key)
    }

    pub fn extras(&self) -> &Map<String, Json> {
        &self.extra
    }

    /// Returns the memoized value of `resolver`, if it was already resolved
    /// on this record.
    pub fn resolved(&self, resolver: &str) -> Option<Resolved> {
        self.memo().get(resolver).cloned()
    }

    /// Reads `name` as an attribute, then an extension field, and finally
    /// as a resolver, which is executed on first access and memoized.
    pub async fn get_field(&self, db: &Db, name: &str) -> Result<Field<'_>> {
        if let Some(value) = self.attributes.get(name) {
            return Ok(Field::Attribute(value));
        }

        if let Some(value) = self.extra.get(name) {
            return Ok(Field::Extra(value));
        }

        let has_resolver = db
            .schema()
            .entity(&self.entity)
            .is_some_and(|entity| entity.has_resolver(name));

        if !has_resolver {
            return Err(Error::unknown_resolver(&self.entity, name));
        }

        Ok(Field::Resolved(db.resolve(self, name).await?))
    }

    /// Converts the record back into its wire representation.
    pub fn to_row(&self) -> Row {
        let mut row = Row::new();

        for (name, value) in &self.attributes {
            row.set(name.clone(), value);
        }

        for (key, value) in &self.extra {
            row.insert(key.clone(), value.clone());
        }

        row
    }

    /// Identifier rendered for diagnostics; strings are not quoted.
    pub(crate) fn id_string(&self) -> String {
        match &self.id {
            Value::String(id) => id.clone(),
            id => id.to_string(),
        }
    }

    /// Stores `value` as the result of `resolver` unless a value is already
    /// memoized, and returns whichever value ends up stored.
    pub(crate) fn memoize(&self, resolver: &str, value: Resolved) -> Resolved {
        self.memo()
            .entry(resolver.to_string())
            .or_insert(value)
            .clone()
    }

    fn memo(&self) -> MutexGuard<'_, HashMap<String, Resolved>> {
        // The memo only ever holds complete values, so a poisoned lock still
        // guards consistent data.
        self.resolved.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
