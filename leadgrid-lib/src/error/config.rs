//! Table configuration errors

/// Errors raised at the configuration boundary of a table.
///
/// These are only returned when a table is constructed. Once a
/// [`TableController`](crate::table::TableController) exists, its commands
/// clamp or ignore bad arguments instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No allowed page sizes were configured.
    #[error("At least one page size must be allowed")]
    EmptyPageSizes,

    /// A page size of zero was configured.
    #[error("Page sizes must be positive")]
    ZeroPageSize,

    /// The initial page size is not one of the allowed sizes.
    #[error("Page size {size} is not one of the allowed sizes {allowed:?}")]
    PageSizeNotAllowed { size: usize, allowed: Vec<usize> },

    /// A configured key does not name any column.
    #[error("Unknown column '{key}'")]
    UnknownColumn { key: String },

    /// The initial sort names a column that is not sortable.
    #[error("Column '{key}' is not sortable")]
    SortNotAllowed { key: String },

    /// Two columns share the same key.
    #[error("Column '{key}' is defined more than once")]
    DuplicateColumn { key: String },
}

impl ConfigError {
    /// Creates an unknown column error.
    pub fn unknown_column(key: impl Into<String>) -> Self {
        Self::UnknownColumn { key: key.into() }
    }

    /// Creates a sort-not-allowed error.
    pub fn sort_not_allowed(key: impl Into<String>) -> Self {
        Self::SortNotAllowed { key: key.into() }
    }
}
