//! Per-column filters.

use std::collections::HashMap;

use super::ColumnKey;
use super::TableRow;
use crate::model::Value;

/// Wire value UIs use for "no filter" in drop-downs.
pub const ALL_SENTINEL: &str = "__ALL__";

/// The selected value(s) of one column filter.
///
/// # Example
///
/// ```
/// use leadgrid_lib::model::Value;
/// use leadgrid_lib::table::FilterValue;
///
/// let role = FilterValue::one("Admin");
/// assert!(role.matches(&Value::from("Admin")));
///
/// let states = FilterValue::any(["TX", "CA"]);
/// assert!(states.matches(&Value::from("CA")));
/// assert!(!states.matches(&Value::from("NY")));
///
/// assert_eq!(FilterValue::parse("__ALL__"), FilterValue::All);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FilterValue {
    /// Unconstrained.
    #[default]
    All,
    /// Single-select: the row value must equal this value.
    One(Value),
    /// Multi-select: the row value must equal one of these values.
    Any(Vec<Value>),
}

impl FilterValue {
    /// Creates a single-select filter value.
    pub fn one(value: impl Into<Value>) -> Self {
        FilterValue::One(value.into())
    }

    /// Creates a multi-select filter value.
    pub fn any<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        FilterValue::Any(values.into_iter().map(Into::into).collect())
    }

    /// Parses a drop-down value: [`ALL_SENTINEL`] and the empty string mean
    /// "no filter", anything else is a single string value.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() || raw == ALL_SENTINEL {
            FilterValue::All
        } else {
            FilterValue::One(Value::from(raw))
        }
    }

    /// Returns `true` if this value does not constrain the column.
    ///
    /// An empty multi-select counts as unconstrained.
    pub fn is_all(&self) -> bool {
        match self {
            FilterValue::All => true,
            FilterValue::One(_) => false,
            FilterValue::Any(values) => values.is_empty(),
        }
    }

    /// Returns `true` if a row value passes this filter.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FilterValue::All => true,
            FilterValue::One(expected) => value_matches(value, expected),
            FilterValue::Any(options) => {
                options.is_empty() || options.iter().any(|expected| value_matches(value, expected))
            }
        }
    }
}

// A list-valued field passes when any of its elements does.
fn value_matches(value: &Value, expected: &Value) -> bool {
    match value {
        Value::List(items) if !matches!(expected, Value::List(_)) => {
            items.iter().any(|item| item.loosely_eq(expected))
        }
        _ => value.loosely_eq(expected),
    }
}

impl From<Value> for FilterValue {
    fn from(value: Value) -> Self {
        FilterValue::One(value)
    }
}

impl From<Vec<Value>> for FilterValue {
    fn from(values: Vec<Value>) -> Self {
        FilterValue::Any(values)
    }
}

/// Active column filters of a table.
///
/// Filters combine with AND across columns; a multi-select value combines
/// with OR within its column. Only constraining values are stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Filters<K: ColumnKey> {
    active: HashMap<K, FilterValue>,
}

impl<K: ColumnKey> Default for Filters<K> {
    fn default() -> Self {
        Self {
            active: HashMap::new(),
        }
    }
}

impl<K: ColumnKey> Filters<K> {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter of one column.
    ///
    /// Unconstrained values remove the column's entry. Returns `true` if the
    /// stored filters changed.
    pub fn set(&mut self, key: K, value: FilterValue) -> bool {
        if value.is_all() {
            return self.active.remove(&key).is_some();
        }
        match self.active.get(&key) {
            Some(current) if *current == value => false,
            _ => {
                self.active.insert(key, value);
                true
            }
        }
    }

    /// Returns the filter of a column, if it is constrained.
    pub fn get(&self, key: &K) -> Option<&FilterValue> {
        self.active.get(key)
    }

    /// Removes every filter. Returns `true` if any was active.
    pub fn clear(&mut self) -> bool {
        let had_any = !self.active.is_empty();
        self.active.clear();
        had_any
    }

    /// Returns `true` if no column is constrained.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Number of constrained columns.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Iterates over constrained columns.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &FilterValue)> {
        self.active.iter()
    }

    /// Returns `true` if a row passes every active filter.
    pub fn matches<R>(&self, row: &R) -> bool
    where
        R: TableRow<Key = K>,
    {
        self.active
            .iter()
            .all(|(key, filter)| filter.matches(&row.value(key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    fn lead(id: i64, state: &str, tags: &[&str]) -> Record {
        Record::new(id)
            .set("state", state)
            .set("tags", Value::List(tags.iter().map(|t| Value::from(*t)).collect()))
    }

    #[test]
    fn test_and_across_columns() {
        let mut filters = Filters::new();
        filters.set("state".to_string(), FilterValue::one("TX"));
        filters.set("tags".to_string(), FilterValue::one("auto"));

        assert!(filters.matches(&lead(1, "TX", &["auto", "home"])));
        assert!(!filters.matches(&lead(2, "TX", &["home"])));
        assert!(!filters.matches(&lead(3, "CA", &["auto"])));
    }

    #[test]
    fn test_or_within_column() {
        let mut filters = Filters::new();
        filters.set("state".to_string(), FilterValue::any(["TX", "CA"]));

        assert!(filters.matches(&lead(1, "TX", &[])));
        assert!(filters.matches(&lead(2, "CA", &[])));
        assert!(!filters.matches(&lead(3, "NY", &[])));
    }

    #[test]
    fn test_set_reports_changes() {
        let mut filters = Filters::new();
        assert!(filters.set("state".to_string(), FilterValue::one("TX")));
        assert!(!filters.set("state".to_string(), FilterValue::one("TX")));
        assert!(filters.set("state".to_string(), FilterValue::Any(vec![])));
        assert!(filters.is_empty());
        assert!(!filters.set("state".to_string(), FilterValue::All));
    }

    #[test]
    fn test_missing_field_is_null() {
        let mut filters = Filters::new();
        filters.set("vertical".to_string(), FilterValue::one("auto"));

        assert!(!filters.matches(&lead(1, "TX", &[])));
    }
}
