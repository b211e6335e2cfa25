//! Free-text search.

use super::TableRow;

/// A free-text search over the searchable columns of a table.
///
/// Matching is a case-insensitive substring test against each searchable
/// column's default string coercion. Whitespace is part of the query; only
/// the empty query matches every row.
///
/// # Example
///
/// ```
/// use leadgrid_lib::table::SearchQuery;
///
/// let query = SearchQuery::new("jane");
/// assert!(query.matches_text("Jane Smith"));
/// assert!(!query.matches_text("Jan"));
/// assert!(!SearchQuery::new(" ").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    needle: String,
}

impl SearchQuery {
    /// Creates a query from user input.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let needle = raw.to_lowercase();
        Self { raw, needle }
    }

    /// The query exactly as typed.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns `true` if the query matches everything.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns `true` if both queries match the same rows.
    ///
    /// `"Jane"` and `"jane"` are equivalent.
    pub fn is_equivalent(&self, other: &SearchQuery) -> bool {
        self.needle == other.needle
    }

    /// Case-insensitive substring test against one piece of text.
    pub fn matches_text(&self, text: &str) -> bool {
        self.is_empty() || text.to_lowercase().contains(&self.needle)
    }

    /// Returns `true` if any of the given columns of `row` contains the query.
    pub fn matches<R: TableRow>(&self, row: &R, keys: &[R::Key]) -> bool {
        if self.is_empty() {
            return true;
        }
        keys.iter()
            .any(|key| self.matches_text(&row.value(key).to_string()))
    }
}
