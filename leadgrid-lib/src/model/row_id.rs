//! Stable row identifiers

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::Value;

/// Stable identifier of a table row.
///
/// Selection is tracked by `RowId`, not by position or object identity, so
/// it survives re-sorting and re-fetching of the same logical rows.
///
/// # Example
///
/// ```
/// use leadgrid_lib::model::RowId;
///
/// assert_eq!(RowId::from(7), RowId::Num(7));
/// assert_eq!(RowId::from("lead-7").to_string(), "lead-7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    /// Numeric database id.
    Num(i64),
    /// GUID id.
    Guid(Uuid),
    /// Any other textual id.
    Text(String),
}

impl RowId {
    /// Extracts an id from a field value.
    ///
    /// Integers (and integral floats) become `Num`, GUID strings become
    /// `Guid`, other non-empty strings become `Text`. Everything else has no
    /// usable id.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(n) => Some(RowId::Num(*n)),
            Value::Float(n) if n.fract() == 0.0 && n.is_finite() => Some(RowId::Num(*n as i64)),
            Value::Guid(g) => Some(RowId::Guid(*g)),
            Value::String(s) if !s.is_empty() => Some(RowId::from(s.as_str())),
            _ => None,
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Num(n) => write!(f, "{n}"),
            RowId::Guid(g) => write!(f, "{}", g.hyphenated()),
            RowId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RowId {
    fn from(v: i64) -> Self {
        RowId::Num(v)
    }
}

impl From<i32> for RowId {
    fn from(v: i32) -> Self {
        RowId::Num(v.into())
    }
}

impl From<u32> for RowId {
    fn from(v: u32) -> Self {
        RowId::Num(v.into())
    }
}

impl From<Uuid> for RowId {
    fn from(v: Uuid) -> Self {
        RowId::Guid(v)
    }
}

/// GUID strings become [`RowId::Guid`], matching ids decoded from JSON.
impl From<String> for RowId {
    fn from(v: String) -> Self {
        match Uuid::parse_str(&v) {
            Ok(g) => RowId::Guid(g),
            Err(_) => RowId::Text(v),
        }
    }
}

impl From<&str> for RowId {
    fn from(v: &str) -> Self {
        match Uuid::parse_str(v) {
            Ok(g) => RowId::Guid(g),
            Err(_) => RowId::Text(v.to_string()),
        }
    }
}

impl From<&RowId> for Value {
    fn from(id: &RowId) -> Self {
        match id {
            RowId::Num(n) => Value::Int(*n),
            RowId::Guid(g) => Value::Guid(*g),
            RowId::Text(s) => Value::String(s.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    const GUID: &str = "6f9619ff-8b86-d011-b42d-00c04fc964ff";

    #[test]
    fn test_guid_strings_parse_the_same_everywhere() {
        let built = Record::new(GUID);
        let decoded = Record::from_json(&format!(r#"{{"id": "{GUID}"}}"#)).unwrap();

        assert!(matches!(built.id(), RowId::Guid(_)));
        assert_eq!(built.id(), decoded.id());
        assert_eq!(RowId::from(GUID.to_string()), RowId::from(GUID));
        assert_eq!(RowId::from_value(&Value::from(GUID)), Some(RowId::from(GUID)));
    }

    #[test]
    fn test_text_ids() {
        assert_eq!(RowId::from("lead-7"), RowId::Text("lead-7".to_string()));
        assert_eq!(RowId::from_value(&Value::from("")), None);
        assert_eq!(RowId::from_value(&Value::Float(3.0)), Some(RowId::Num(3)));
    }
}
