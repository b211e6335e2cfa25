//! Value enum for dynamic field values

use std::collections::BTreeMap;
use std::fmt;

use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use uuid::Uuid;

/// A dynamic value that can hold any field of a table row.
///
/// Rows handed to a table are either statically typed structs that expose
/// their fields as `Value`s, or dynamic [`Record`](super::Record)s that store
/// them directly.
///
/// # Type Mapping
///
/// | JSON from the backend | Rust Variant |
/// |-----------------------|--------------|
/// | `null` | `Null` |
/// | `true` / `false` | `Bool` |
/// | integer | `Int` |
/// | other number | `Float` |
/// | RFC 3339 string | `DateTime` |
/// | other string | `String` |
/// | array | `List` |
/// | object | `Object` |
///
/// `Decimal` and `Guid` are never produced from JSON; typed rows use them for
/// prices and identifiers.
///
/// # Example
///
/// ```
/// use leadgrid_lib::model::Value;
///
/// let name = Value::from("Jane Smith");
/// let leads = Value::from(42i64);
/// let active = Value::from(true);
/// let empty = Value::Null;
///
/// assert_eq!(leads.to_string(), "42");
/// assert_eq!(empty.to_string(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Arbitrary precision decimal (prices).
    Decimal(Decimal),
    /// String value.
    String(String),
    /// GUID/UUID value.
    Guid(Uuid),
    /// Date and time in UTC.
    DateTime(DateTime<Utc>),
    /// Multi-valued field (tags, states served, ...).
    List(Vec<Value>),
    /// Nested object.
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Guid(_) => "guid",
            Value::DateTime(_) => "datetime",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }

    /// Returns the string slice if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric value of `Int`, `Float` and `Decimal` as `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            Value::Decimal(d) => d.to_f64(),
            _ => None,
        }
    }

    /// Equality used by column filters.
    ///
    /// Numbers compare by value across `Int`, `Float` and `Decimal`, so a
    /// filter on `25` matches a price stored as `25.00`. All other values
    /// compare structurally.
    pub fn loosely_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Decimal(d), Value::Int(n)) | (Value::Int(n), Value::Decimal(d)) => {
                *d == Decimal::from(*n)
            }
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a == b,
                _ => self == other,
            },
        }
    }
}

/// Default string coercion.
///
/// This is the text searched by the table and written to CSV when a column
/// has no renderer of its own.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::String(s) => f.write_str(s),
            Value::Guid(g) => write!(f, "{}", g.hyphenated()),
            Value::DateTime(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Value::Object(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

// =============================================================================
// Serde
// =============================================================================

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::Decimal(d) => Serialize::serialize(d, serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Guid(g) => g.serialize(serializer),
            Value::DateTime(dt) => dt.serialize(serializer),
            Value::List(items) => items.serialize(serializer),
            Value::Object(map) => map.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Guid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => match DateTime::parse_from_rfc3339(&s) {
                Ok(dt) => Value::DateTime(dt.with_timezone(&Utc)),
                Err(_) => Value::String(s),
            },
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_display_coercion() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Float(2.0).to_string(), "2");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Decimal(Decimal::new(1999, 2)).to_string(), "19.99");

        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        assert_eq!(Value::DateTime(dt).to_string(), "2024-03-01T09:30:00Z");

        let list = Value::List(vec!["TX".into(), "CA".into()]);
        assert_eq!(list.to_string(), "TX, CA");
    }

    #[test]
    fn test_serialize_decimal() {
        let json = serde_json::to_string(&Value::Decimal(Decimal::new(1999, 2))).unwrap();
        assert_eq!(json, r#""19.99""#);

        let list = Value::List(vec![Value::Decimal(Decimal::new(5, 0)), Value::Null]);
        assert_eq!(serde_json::to_string(&list).unwrap(), r#"["5",null]"#);
    }

    #[test]
    fn test_object_display_is_json() {
        let mut map = BTreeMap::new();
        map.insert("city".to_string(), Value::from("Austin"));
        assert_eq!(Value::Object(map).to_string(), r#"{"city":"Austin"}"#);
    }

    #[test]
    fn test_loose_numeric_equality() {
        assert!(Value::Int(25).loosely_eq(&Value::Decimal(Decimal::new(2500, 2))));
        assert!(Value::Float(1.0).loosely_eq(&Value::Int(1)));
        assert!(!Value::from("1").loosely_eq(&Value::Int(1)));
        assert!(Value::from("Admin").loosely_eq(&Value::from("Admin")));
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::json!({
            "count": 3,
            "ratio": 0.5,
            "created": "2024-01-02T03:04:05Z",
            "note": "hello",
            "tags": ["a", null]
        });
        let Value::Object(map) = Value::from(json) else {
            panic!("expected object");
        };
        assert_eq!(map["count"], Value::Int(3));
        assert_eq!(map["ratio"], Value::Float(0.5));
        assert_eq!(map["created"].type_name(), "datetime");
        assert_eq!(map["note"], Value::from("hello"));
        assert_eq!(map["tags"], Value::List(vec!["a".into(), Value::Null]));
    }
}
