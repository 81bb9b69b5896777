use crate::{stmt::Value, Error};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

/// A raw, untyped record as the store holds it.
///
/// Keys keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: Map<String, Json>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Json> {
        self.fields.get(field)
    }

    /// Returns the field as an untyped [`Value`]; absent fields are null.
    pub fn value(&self, field: &str) -> Value {
        self.get(field).map(Value::from_json).unwrap_or(Value::Null)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Json>) -> Option<Json> {
        self.fields.insert(field.into(), value.into())
    }

    pub fn set(&mut self, field: impl Into<String>, value: &Value) {
        self.fields.insert(field.into(), value.to_json());
    }

    /// Builder-style variant of [`Row::insert`].
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Json>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn remove(&mut self, field: &str) -> Option<Json> {
        self.fields.remove(field)
    }

    /// Copies every field of `patch` over this row.
    pub fn merge(&mut self, patch: Row) {
        self.fields.extend(patch.fields);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Json)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_json(self) -> Json {
        Json::Object(self.fields)
    }
}

impl From<Map<String, Json>> for Row {
    fn from(fields: Map<String, Json>) -> Self {
        Self { fields }
    }
}

impl TryFrom<Json> for Row {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self, Self::Error> {
        match value {
            Json::Object(fields) => Ok(Self { fields }),
            other => Err(err!("a row must be a JSON object, got `{other}`")),
        }
    }
}

impl<K: Into<String>, V: Into<Json>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Row {
    type Item = (String, Json);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
