use super::Record;

use chrono::{DateTime, TimeZone, Utc};
use indexmap::IndexMap;
use onyx_core::{
    driver::Row,
    schema::{Attribute, Entity},
    stmt::{Type, Value},
    Error, Result,
};
use serde_json::{Map, Value as Json};
use std::{collections::HashMap, sync::Mutex};

impl Record {
    /// Builds a typed record of `entity` from a raw store row.
    ///
    /// Every declared attribute is coerced to its schema type. Absent or null
    /// values become `Null` on nullable attributes and fail on required ones.
    /// Undeclared keys are kept as extension fields.
    pub fn materialize(entity: &Entity, row: Row) -> Result<Record> {
        let mut raw = row.into_iter().collect::<Map<String, Json>>();
        let mut attributes = IndexMap::with_capacity(entity.attributes.len());

        for attr in &entity.attributes {
            let value = match raw.shift_remove(&attr.name) {
                None | Some(Json::Null) if attr.nullable => Value::Null,
                None | Some(Json::Null) => {
                    return Err(Error::type_coercion(&attr.name, attr.ty.name(), "null"))
                }
                Some(json) => coerce(attr, &json)?,
            };

            attributes.insert(attr.name.clone(), value);
        }

        let id = attributes
            .get(&entity.identifier.name)
            .cloned()
            .unwrap_or_default();

        Ok(Record {
            entity: entity.name.clone(),
            id,
            attributes,
            extra: raw,
            resolved: Mutex::new(HashMap::new()),
        })
    }
}

/// Rewrites every declared attribute present in `row` into the canonical
/// JSON form of its coerced value, so the store holds what lookups compare
/// against. Nulls and undeclared keys are left as they are.
pub(crate) fn normalize(entity: &Entity, mut row: Row) -> Result<Row> {
    for attr in &entity.attributes {
        let value = match row.get(&attr.name) {
            None | Some(Json::Null) => continue,
            Some(json) => coerce(attr, json)?,
        };

        row.set(attr.name.clone(), &value);
    }

    Ok(row)
}

fn coerce(attr: &Attribute, json: &Json) -> Result<Value> {
    let value = match (attr.ty, json) {
        (Type::String, Json::String(value)) => Some(Value::String(value.clone())),

        (Type::Int, Json::Number(number)) => number
            .as_i64()
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|value| value.fract() == 0.0 && value.abs() < i64::MAX as f64)
                    .map(|value| value as i64)
            })
            .map(Value::I64),
        (Type::Int, Json::String(value)) => value.trim().parse().ok().map(Value::I64),

        (Type::Double, Json::Number(number)) => number.as_f64().map(Value::F64),
        (Type::Double, Json::String(value)) => value.trim().parse().ok().map(Value::F64),

        (Type::Boolean, Json::Bool(value)) => Some(Value::Bool(*value)),
        (Type::Boolean, Json::String(value)) => match value.as_str() {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },

        (Type::Timestamp, Json::String(value)) => parse_timestamp(value).map(Value::Timestamp),
        (Type::Timestamp, Json::Number(number)) => number
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
            .map(Value::Timestamp),

        (Type::EmbeddedObject, json) => Some(Value::Object(json.clone())),

        _ => None,
    };

    value.ok_or_else(|| Error::type_coercion(&attr.name, attr.ty.name(), describe(json)))
}

/// Accepts RFC 3339 as well as the zone-less `YYYY-MM-DDTHH:MM:SS[.fff]` and
/// `YYYY-MM-DD` forms, which are read as UTC.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }

    if let Ok(ts) = chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ts.and_utc());
    }

    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|ts| ts.and_utc())
}

fn describe(json: &Json) -> String {
    const MAX: usize = 64;

    let text = json.to_string();
    if text.chars().count() <= MAX {
        text
    } else {
        let mut text = text.chars().take(MAX).collect::<String>();
        text.push_str("...");
        text
    }
}
