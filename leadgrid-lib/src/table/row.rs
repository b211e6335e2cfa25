//! TableRow and ColumnKey traits.

use std::borrow::Cow;
use std::fmt::Debug;
use std::hash::Hash;

use crate::model::Record;
use crate::model::RowId;
use crate::model::Value;

/// Key naming one field of a row type.
///
/// Tables over statically declared row structs use a fieldless enum as the
/// key, so a column pointing at a field that does not exist fails to compile.
/// Dynamic [`Record`] rows use `String` keys.
///
/// # Example
///
/// ```
/// use leadgrid_lib::table::ColumnKey;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum LeadField {
///     Name,
///     State,
/// }
///
/// impl ColumnKey for LeadField {
///     fn name(&self) -> &str {
///         match self {
///             LeadField::Name => "name",
///             LeadField::State => "state",
///         }
///     }
/// }
/// ```
pub trait ColumnKey: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// Field name, used in logs and error messages.
    fn name(&self) -> &str;
}

impl ColumnKey for String {
    fn name(&self) -> &str {
        self
    }
}

impl ColumnKey for &'static str {
    fn name(&self) -> &str {
        self
    }
}

/// Trait for items that can be displayed as rows in a table.
///
/// Implement this trait to let a [`TableController`](super::TableController)
/// search, filter, sort and export your rows. Rows are never mutated by the
/// controller.
///
/// # Example
///
/// ```
/// use std::borrow::Cow;
///
/// use leadgrid_lib::model::{RowId, Value};
/// use leadgrid_lib::table::{ColumnKey, TableRow};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum CustomerField {
///     Name,
///     Credits,
/// }
///
/// impl ColumnKey for CustomerField {
///     fn name(&self) -> &str {
///         match self {
///             CustomerField::Name => "name",
///             CustomerField::Credits => "credits",
///         }
///     }
/// }
///
/// struct Customer {
///     id: i64,
///     name: String,
///     credits: i64,
/// }
///
/// impl TableRow for Customer {
///     type Key = CustomerField;
///
///     fn id(&self) -> RowId {
///         RowId::Num(self.id)
///     }
///
///     fn value(&self, key: &CustomerField) -> Cow<'_, Value> {
///         match key {
///             CustomerField::Name => Cow::Owned(Value::from(self.name.as_str())),
///             CustomerField::Credits => Cow::Owned(Value::Int(self.credits)),
///         }
///     }
/// }
/// ```
pub trait TableRow: Send + Sync + 'static {
    /// Key type naming this row's fields.
    type Key: ColumnKey;

    /// Unique identifier for this row.
    ///
    /// Used for stable selection across re-sorts and re-fetches.
    fn id(&self) -> RowId;

    /// Returns the value of one field.
    ///
    /// Missing fields read as [`Value::Null`].
    fn value(&self, key: &Self::Key) -> Cow<'_, Value>;
}

impl TableRow for Record {
    type Key = String;

    fn id(&self) -> RowId {
        self.id.clone()
    }

    fn value(&self, key: &String) -> Cow<'_, Value> {
        match self.fields.get(key) {
            Some(value) => Cow::Borrowed(value),
            None => Cow::Owned(Value::Null),
        }
    }
}
