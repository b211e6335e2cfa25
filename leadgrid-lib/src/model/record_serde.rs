//! Serialization for Record in the REST backend's JSON shape.
//!
//! A record is a flat JSON object. The `id` member is mandatory and must be a
//! number or a non-empty string; it stays in the field map as well. Member
//! values are converted with `Value::from(serde_json::Value)`.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error as _;
use serde::de::MapAccess;
use serde::de::Visitor;

use super::ID_FIELD;
use super::Record;
use super::Value;

impl Record {
    /// Parses a single record from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parses a JSON array of objects, as returned by list endpoints.
    pub fn from_json_array(json: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// =============================================================================
// Serialization
// =============================================================================

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Sorted so exports and cache keys are stable.
        let ordered: BTreeMap<&String, &Value> = self.fields.iter().collect();
        ordered.serialize(serializer)
    }
}

// =============================================================================
// Deserialization
// =============================================================================

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a JSON object with an `id` member")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Record, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut fields: HashMap<String, Value> =
            HashMap::with_capacity(map.size_hint().unwrap_or(0));

        while let Some(key) = map.next_key::<String>()? {
            let value: Value = map.next_value()?;
            fields.insert(key, value);
        }

        match fields.get(ID_FIELD) {
            None => Err(M::Error::missing_field("id")),
            Some(raw) => {
                let type_name = raw.type_name();
                Record::from_fields(fields).ok_or_else(|| {
                    M::Error::custom(format!(
                        "`id` must be a number or non-empty string, got {type_name}"
                    ))
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RowId;

    #[test]
    fn test_deserialize_simple_fields() {
        let json = r#"{"id": 12, "name": "Jane Smith", "state": "TX", "price": 24.5}"#;
        let record = Record::from_json(json).unwrap();

        assert_eq!(record.id(), &RowId::Num(12));
        assert_eq!(record.get_string("name").unwrap(), Some("Jane Smith"));
        assert_eq!(record.get_float("price").unwrap(), Some(24.5));
        assert_eq!(record.get_int("id").unwrap(), Some(12));
    }

    #[test]
    fn test_deserialize_guid_id() {
        let json = r#"{"id": "12345678-1234-1234-1234-123456789012"}"#;
        let record = Record::from_json(json).unwrap();

        assert!(matches!(record.id(), RowId::Guid(_)));
    }

    #[test]
    fn test_deserialize_requires_id() {
        let err = Record::from_json(r#"{"name": "no id"}"#).unwrap_err();
        assert!(err.to_string().contains("missing field `id`"));

        let err = Record::from_json(r#"{"id": null}"#).unwrap_err();
        assert!(err.to_string().contains("`id` must be"));
    }

    #[test]
    fn test_deserialize_array() {
        let json = r#"[{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]"#;
        let records = Record::from_json_array(json).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get_string("name").unwrap(), Some("B"));
    }

    #[test]
    fn test_serialize_round_trip() {
        let record = Record::new(3).set("name", "C").set("active", true);
        let json = serde_json::to_string(&record).unwrap();

        assert_eq!(json, r#"{"active":true,"id":3,"name":"C"}"#);
        assert_eq!(Record::from_json(&json).unwrap(), record);
    }
}
