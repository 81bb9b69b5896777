use super::Type;

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed 64-bit integer
    I64(i64),

    /// Double precision float
    F64(f64),

    /// String value
    String(String),

    /// Point in time, always normalized to UTC
    Timestamp(DateTime<Utc>),

    /// Free-form embedded document, kept as JSON
    Object(serde_json::Value),

    /// A list of values
    List(Vec<Value>),

    /// Null value
    #[default]
    Null,
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub fn list_from_vec(items: Vec<Self>) -> Self {
        Self::List(items)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Timestamp(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Name of the value's variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "Boolean",
            Self::I64(_) => "Int",
            Self::F64(_) => "Double",
            Self::String(_) => "String",
            Self::Timestamp(_) => "Timestamp",
            Self::Object(_) => "EmbeddedObject",
            Self::List(_) => "List",
            Self::Null => "Null",
        }
    }

    /// Returns `true` if the value can be stored in an attribute of type `ty`.
    pub fn is_a(&self, ty: Type) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(_) => ty == Type::Boolean,
            Self::I64(_) => ty == Type::Int,
            Self::F64(_) => ty == Type::Double,
            Self::String(_) => ty == Type::String,
            Self::Timestamp(_) => ty == Type::Timestamp,
            Self::Object(_) => ty == Type::EmbeddedObject,
            Self::List(_) => false,
        }
    }

    /// Converts a raw JSON value without any schema guidance.
    ///
    /// Used for literals and open extension fields, where no declared type is
    /// available. Strings stay strings even when they look like timestamps.
    pub fn from_json(json: &serde_json::Value) -> Value {
        use serde_json::Value as Json;

        match json {
            Json::Null => Value::Null,
            Json::Bool(v) => Value::Bool(*v),
            Json::Number(n) => match n.as_i64() {
                Some(v) => Value::I64(v),
                None => Value::F64(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(v) => Value::String(v.clone()),
            Json::Array(items) => Value::List(items.iter().map(Value::from_json).collect()),
            Json::Object(_) => Value::Object(json.clone()),
        }
    }

    /// Converts the value into its wire representation.
    ///
    /// Timestamps are rendered as RFC 3339 strings with millisecond precision.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Self::Null => Json::Null,
            Self::Bool(v) => Json::Bool(*v),
            Self::I64(v) => Json::from(*v),
            Self::F64(v) => serde_json::Number::from_f64(*v)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Self::String(v) => Json::String(v.clone()),
            Self::Timestamp(v) => Json::String(v.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Self::Object(v) => v.clone(),
            Self::List(items) => Json::Array(items.iter().map(Value::to_json).collect()),
        }
    }

    /// Compares the value against a raw stored value.
    ///
    /// Numbers compare numerically regardless of integer/float encoding and
    /// timestamps compare by instant, so a stored `"2024-01-01T00:00:00Z"`
    /// equals a `Timestamp` for the same instant even if formatted
    /// differently.
    pub fn eq_json(&self, json: &serde_json::Value) -> bool {
        use serde_json::Value as Json;

        match (self, json) {
            (Self::Null, Json::Null) => true,
            (Self::Bool(lhs), Json::Bool(rhs)) => lhs == rhs,
            (Self::I64(lhs), Json::Number(rhs)) => match rhs.as_i64() {
                Some(rhs) => *lhs == rhs,
                None => rhs.as_f64() == Some(*lhs as f64),
            },
            (Self::F64(lhs), Json::Number(rhs)) => rhs.as_f64() == Some(*lhs),
            (Self::String(lhs), Json::String(rhs)) => lhs == rhs,
            (Self::Timestamp(lhs), Json::String(rhs)) => DateTime::parse_from_rfc3339(rhs)
                .map(|rhs| rhs.with_timezone(&Utc) == *lhs)
                .unwrap_or(false),
            (Self::Object(lhs), rhs) => lhs == rhs,
            (Self::List(lhs), Json::Array(rhs)) => {
                lhs.len() == rhs.len() && lhs.iter().zip(rhs).all(|(lhs, rhs)| lhs.eq_json(rhs))
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
            Self::Timestamp(v) => write!(
                f,
                "{:?}",
                v.to_rfc3339_opts(SecondsFormat::Millis, true)
            ),
            Self::Object(v) => write!(f, "{v}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I64(src.into())
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::String(src.clone())
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(src: DateTime<Utc>) -> Self {
        Self::Timestamp(src)
    }
}

impl<T> From<Option<T>> for Value
where
    Value: From<T>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::from(value),
            None => Self::Null,
        }
    }
}

impl<T> From<Vec<T>> for Value
where
    Value: From<T>,
{
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Value::from).collect())
    }
}
