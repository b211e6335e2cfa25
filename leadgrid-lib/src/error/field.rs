//! Record field access errors

/// Error returned by the typed getters of [`Record`](crate::model::Record).
///
/// A field holding `null` is not an error; the getters return `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The record has no such field.
    #[error("Record has no field '{field}'")]
    Missing { field: String },

    /// The field holds a different kind of value.
    #[error("Field '{field}' holds {found}, not {expected}")]
    WrongKind {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl FieldError {
    /// Creates a missing field error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    /// Creates a wrong kind error.
    pub fn wrong_kind(
        field: impl Into<String>,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::WrongKind {
            field: field.into(),
            expected,
            found,
        }
    }

    /// Name of the field the error is about.
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } | Self::WrongKind { field, .. } => field,
        }
    }
}
