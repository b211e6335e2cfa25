//! Dynamic row record

use std::collections::BTreeMap;
use std::collections::HashMap;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::RowId;
use super::Value;
use crate::error::FieldError;

/// Name of the identifier field every record carries.
pub const ID_FIELD: &str = "id";

/// A row whose fields are only known at runtime, such as one object of a
/// JSON response.
///
/// The row id is kept both as [`Record::id`] and as the regular `"id"` field,
/// so it can be shown in a column like any other field. Typed getters read a
/// field as one kind of value and report what went wrong otherwise.
///
/// # Example
///
/// ```
/// use leadgrid_lib::model::Record;
///
/// let record = Record::new(1)
///     .set("name", "Jane Smith")
///     .set("leads", 12i64);
///
/// assert_eq!(record.get_string("name").unwrap(), Some("Jane Smith"));
/// assert_eq!(record.get_int("id").unwrap(), Some(1));
/// assert!(record.get_bool("name").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub(crate) id: RowId,
    // Always contains ID_FIELD.
    pub(crate) fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a record holding only its id.
    pub fn new(id: impl Into<RowId>) -> Self {
        let id = id.into();
        let fields = HashMap::from([(ID_FIELD.to_string(), Value::from(&id))]);
        Self { id, fields }
    }

    /// Builds a record from a field map.
    ///
    /// Returns `None` when the map has no usable `"id"` field.
    pub fn from_fields(fields: HashMap<String, Value>) -> Option<Self> {
        let id = RowId::from_value(fields.get(ID_FIELD)?)?;
        Some(Self { id, fields })
    }

    /// The record id.
    pub fn id(&self) -> &RowId {
        &self.id
    }

    /// Raw value of a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record has the field, even if it is null.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// All fields, including `"id"`.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Sets a field.
    ///
    /// The `"id"` field is fixed at construction; writes to it are ignored.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        if field != ID_FIELD {
            self.fields.insert(field, value.into());
        }
    }

    /// Removes a field and returns its value. `"id"` cannot be removed.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        if field == ID_FIELD {
            return None;
        }
        self.fields.remove(field)
    }

    // Shared body of the typed getters: missing field is an error, null is
    // `Ok(None)`, anything `pick` rejects is a wrong kind.
    fn typed<'a, T>(
        &'a self,
        field: &str,
        expected: &'static str,
        pick: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<Option<T>, FieldError> {
        let value = self
            .fields
            .get(field)
            .ok_or_else(|| FieldError::missing(field))?;
        if value.is_null() {
            return Ok(None);
        }
        pick(value)
            .map(Some)
            .ok_or_else(|| FieldError::wrong_kind(field, expected, value.type_name()))
    }

    /// Reads a string field.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        self.typed(field, "string", Value::as_str)
    }

    /// Reads a boolean field.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        self.typed(field, "bool", |value| match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        })
    }

    /// Reads an integer field.
    pub fn get_int(&self, field: &str) -> Result<Option<i64>, FieldError> {
        self.typed(field, "int", |value| match value {
            Value::Int(n) => Some(*n),
            _ => None,
        })
    }

    /// Reads a floating point field. Integers are widened.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, FieldError> {
        self.typed(field, "float", |value| match value {
            Value::Float(n) => Some(*n),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        })
    }

    /// Reads a decimal field, such as a price. Integers are widened.
    pub fn get_decimal(&self, field: &str) -> Result<Option<Decimal>, FieldError> {
        self.typed(field, "decimal", |value| match value {
            Value::Decimal(d) => Some(*d),
            Value::Int(n) => Some(Decimal::from(*n)),
            _ => None,
        })
    }

    /// Reads a UUID field.
    pub fn get_guid(&self, field: &str) -> Result<Option<Uuid>, FieldError> {
        self.typed(field, "guid", |value| match value {
            Value::Guid(g) => Some(*g),
            _ => None,
        })
    }

    /// Reads a timestamp field.
    pub fn get_datetime(&self, field: &str) -> Result<Option<DateTime<Utc>>, FieldError> {
        self.typed(field, "datetime", |value| match value {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        })
    }

    /// Reads a multi-valued field.
    pub fn get_list(&self, field: &str) -> Result<Option<&[Value]>, FieldError> {
        self.typed(field, "list", |value| match value {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        })
    }

    /// Reads a nested object field.
    pub fn get_object(&self, field: &str) -> Result<Option<&BTreeMap<String, Value>>, FieldError> {
        self.typed(field, "object", |value| match value {
            Value::Object(map) => Some(map),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_field_is_fixed() {
        let mut record = Record::new("lead-7").set("id", 99i64);
        assert_eq!(record.get("id"), Some(&Value::from("lead-7")));
        assert_eq!(record.remove("id"), None);
        assert_eq!(record.id(), &RowId::from("lead-7"));
    }

    #[test]
    fn test_typed_getters() {
        let record = Record::new(1)
            .set("price", Decimal::new(1250, 2))
            .set("qty", 3i64)
            .set("note", Value::Null);

        assert_eq!(record.get_decimal("price").unwrap(), Some(Decimal::new(1250, 2)));
        assert_eq!(record.get_decimal("qty").unwrap(), Some(Decimal::from(3)));
        assert_eq!(record.get_float("qty").unwrap(), Some(3.0));
        assert_eq!(record.get_string("note").unwrap(), None);
    }

    #[test]
    fn test_getter_errors() {
        let record = Record::new(1).set("qty", 3i64);

        let missing = record.get_int("price").unwrap_err();
        assert_eq!(missing, FieldError::missing("price"));
        assert_eq!(missing.field(), "price");

        assert_eq!(
            record.get_string("qty").unwrap_err(),
            FieldError::wrong_kind("qty", "string", "int")
        );
    }

    #[test]
    fn test_from_fields_requires_id() {
        let mut fields = HashMap::new();
        fields.insert("name".to_string(), Value::from("x"));
        assert!(Record::from_fields(fields.clone()).is_none());

        fields.insert(ID_FIELD.to_string(), Value::Int(5));
        let record = Record::from_fields(fields).unwrap();
        assert_eq!(record.id(), &RowId::Num(5));
    }
}
