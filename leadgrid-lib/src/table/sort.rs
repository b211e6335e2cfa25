//! Sorting types and value ordering.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use super::ColumnKey;
use crate::model::Value;

/// Sort direction of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9, oldest first).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0, newest first).
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Applies this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// The current sort of a table: an optional column and a direction.
///
/// # Example
///
/// ```
/// use leadgrid_lib::table::{SortDirection, SortState};
///
/// let mut sort = SortState::unsorted();
/// sort.toggle("name".to_string());
/// assert_eq!(sort.direction_of(&"name".to_string()), Some(SortDirection::Asc));
///
/// sort.toggle("name".to_string());
/// assert_eq!(sort.direction, SortDirection::Desc);
///
/// sort.toggle("price".to_string());
/// assert_eq!(sort.direction, SortDirection::Asc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(bound(deserialize = "K: Deserialize<'de>"))]
pub struct SortState<K> {
    /// Column sorted by, if any.
    pub key: Option<K>,
    /// Direction applied to `key`.
    #[serde(default)]
    pub direction: SortDirection,
}

impl<K> Default for SortState<K> {
    fn default() -> Self {
        Self {
            key: None,
            direction: SortDirection::Asc,
        }
    }
}

impl<K: ColumnKey> SortState<K> {
    /// No sort: rows keep their original order.
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Sort by a column in the given direction.
    pub fn by(key: K, direction: SortDirection) -> Self {
        Self {
            key: Some(key),
            direction,
        }
    }

    /// Header click: same column flips the direction, another column starts
    /// ascending.
    pub fn toggle(&mut self, key: K) {
        if self.key.as_ref() == Some(&key) {
            self.direction = self.direction.toggled();
        } else {
            self.key = Some(key);
            self.direction = SortDirection::Asc;
        }
    }

    /// Removes the sort.
    pub fn clear(&mut self) {
        self.key = None;
        self.direction = SortDirection::Asc;
    }

    /// Direction of `key` if the table is sorted by it (header indicator).
    pub fn direction_of(&self, key: &K) -> Option<SortDirection> {
        match &self.key {
            Some(current) if current == key => Some(self.direction),
            _ => None,
        }
    }
}

/// Ascending comparison of two field values.
///
/// Strings compare locale-style: case-folded first, then lowercase before
/// uppercase. Numbers compare numerically across `Int`, `Float` and
/// `Decimal`; datetimes by millisecond timestamp; `false` before `true`.
/// Values of different kinds order as bool < number < datetime < string <
/// other, and nulls come last, so the comparison is a total order.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    SortKey::from_value(a).cmp(&SortKey::from_value(b))
}

/// Precomputed comparison key of one value.
///
/// Building the key once per row keeps the sort at one string fold per row
/// instead of one per comparison.
#[derive(Debug, Clone)]
pub(crate) enum SortKey {
    Bool(bool),
    Number(f64),
    DateTime(i64),
    Text { folded: String, raw: String },
    Other(String),
    Null,
}

impl SortKey {
    pub(crate) fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => SortKey::Null,
            Value::Bool(b) => SortKey::Bool(*b),
            Value::Int(_) | Value::Float(_) | Value::Decimal(_) => {
                value.as_f64().map_or(SortKey::Null, SortKey::Number)
            }
            Value::DateTime(dt) => SortKey::DateTime(dt.timestamp_millis()),
            Value::String(s) => SortKey::Text {
                folded: s.to_lowercase(),
                raw: s.clone(),
            },
            Value::Guid(_) | Value::List(_) | Value::Object(_) => SortKey::Other(value.to_string()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Bool(_) => 0,
            SortKey::Number(_) => 1,
            SortKey::DateTime(_) => 2,
            SortKey::Text { .. } => 3,
            SortKey::Other(_) => 4,
            SortKey::Null => 5,
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::DateTime(a), SortKey::DateTime(b)) => a.cmp(b),
            (
                SortKey::Text { folded: fa, raw: ra },
                SortKey::Text { folded: fb, raw: rb },
            ) => fa.cmp(fb).then_with(|| rb.cmp(ra)),
            (SortKey::Other(a), SortKey::Other(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_strings_fold_case() {
        assert_eq!(compare_values(&"apple".into(), &"Banana".into()), Ordering::Less);
        assert_eq!(compare_values(&"a".into(), &"A".into()), Ordering::Less);
        assert_eq!(compare_values(&"Zed".into(), &"alpha".into()), Ordering::Greater);
    }

    #[test]
    fn test_numbers_compare_across_types() {
        assert_eq!(compare_values(&Value::Int(2), &Value::Float(10.5)), Ordering::Less);
        assert_eq!(
            compare_values(&Value::Decimal(Decimal::new(1999, 2)), &Value::Int(20)),
            Ordering::Less
        );
        assert_eq!(compare_values(&Value::Int(3), &Value::Float(3.0)), Ordering::Equal);
    }

    #[test]
    fn test_dates_compare_by_timestamp() {
        let early = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(compare_values(&early.into(), &late.into()), Ordering::Less);
    }

    #[test]
    fn test_nulls_last_and_mixed_kinds_total() {
        assert_eq!(compare_values(&Value::Null, &Value::Int(0)), Ordering::Greater);
        assert_eq!(compare_values(&Value::Int(99), &"1".into()), Ordering::Less);
        assert_eq!(compare_values(&Value::Bool(true), &Value::Int(0)), Ordering::Less);
        assert_eq!(compare_values(&Value::Null, &Value::Null), Ordering::Equal);
    }

    #[test]
    fn test_direction_reverses() {
        assert_eq!(SortDirection::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortDirection::Desc.apply(Ordering::Equal), Ordering::Equal);
        assert_eq!(SortDirection::Asc.toggled().toggled(), SortDirection::Asc);
    }
}
