//! Table configuration

use std::time::Duration;

use serde::Deserialize;

use super::ColumnKey;
use super::SortDirection;
use super::SortState;
use crate::debounce::DEFAULT_SEARCH_DEBOUNCE;
use crate::error::ConfigError;

/// Page sizes offered by default.
pub const DEFAULT_PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];

/// Static configuration of one table.
///
/// Everything here is validated once, when the
/// [`TableController`](super::TableController) is built.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use leadgrid_lib::table::{SortDirection, TableConfig};
///
/// let config = TableConfig::<String>::default()
///     .with_page_sizes([20, 50])
///     .with_page_size(20)
///     .with_sort("created_at".to_string(), SortDirection::Desc)
///     .with_search_debounce(Duration::from_millis(500));
///
/// assert!(config.validate().is_ok());
/// ```
///
/// Presets can also be loaded from JSON:
///
/// ```
/// use leadgrid_lib::table::TableConfig;
///
/// let config: TableConfig<String> = serde_json::from_str(
///     r#"{"page_size": 25, "sort": {"key": "name", "direction": "desc"}}"#,
/// ).unwrap();
/// assert_eq!(config.page_size, 25);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, bound(deserialize = "K: Deserialize<'de>"))]
pub struct TableConfig<K> {
    /// Page sizes the user may choose from.
    ///
    /// Default: 10, 25, 50, 100
    pub page_sizes: Vec<usize>,

    /// Initial page size; must be one of `page_sizes`.
    ///
    /// Default: 10
    pub page_size: usize,

    /// Initial sort.
    ///
    /// Default: unsorted
    pub sort: SortState<K>,

    /// Columns searched by free text. `None` uses the columns marked
    /// searchable.
    pub searchable_keys: Option<Vec<K>>,

    /// Columns that accept filters. `None` allows every column.
    pub filterable_keys: Option<Vec<K>>,

    /// Neighbours shown on each side of the current page in the page strip.
    ///
    /// Default: 2
    pub page_strip_delta: usize,

    /// Debounce delay for the search box, in milliseconds.
    ///
    /// Default: 300
    pub search_debounce_ms: u64,
}

impl<K> Default for TableConfig<K> {
    fn default() -> Self {
        Self {
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            page_size: DEFAULT_PAGE_SIZES[0],
            sort: SortState::default(),
            searchable_keys: None,
            filterable_keys: None,
            page_strip_delta: 2,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE.as_millis() as u64,
        }
    }
}

impl<K: ColumnKey> TableConfig<K> {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the allowed page sizes.
    pub fn with_page_sizes(mut self, sizes: impl IntoIterator<Item = usize>) -> Self {
        self.page_sizes = sizes.into_iter().collect();
        self
    }

    /// Sets the initial page size.
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    /// Sets the initial sort.
    pub fn with_sort(mut self, key: K, direction: SortDirection) -> Self {
        self.sort = SortState::by(key, direction);
        self
    }

    /// Restricts free-text search to the given columns.
    pub fn with_searchable_keys(mut self, keys: impl IntoIterator<Item = K>) -> Self {
        self.searchable_keys = Some(keys.into_iter().collect());
        self
    }

    /// Restricts filtering to the given columns.
    pub fn with_filterable_keys(mut self, keys: impl IntoIterator<Item = K>) -> Self {
        self.filterable_keys = Some(keys.into_iter().collect());
        self
    }

    /// Sets the page strip neighbour count.
    pub fn with_page_strip_delta(mut self, delta: usize) -> Self {
        self.page_strip_delta = delta;
        self
    }

    /// Sets the search debounce delay.
    pub fn with_search_debounce(mut self, delay: Duration) -> Self {
        self.search_debounce_ms = delay.as_millis() as u64;
        self
    }

    /// Debounce delay for the search box.
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Returns `true` if `size` is an allowed page size.
    pub fn allows_page_size(&self, size: usize) -> bool {
        self.page_sizes.contains(&size)
    }

    /// Returns `true` if filters may be set on `key`.
    pub fn allows_filter(&self, key: &K) -> bool {
        self.filterable_keys
            .as_ref()
            .is_none_or(|keys| keys.contains(key))
    }

    /// Checks the page size settings.
    ///
    /// Column keys are checked against the actual columns by
    /// [`TableController::new`](super::TableController::new).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_sizes.is_empty() {
            return Err(ConfigError::EmptyPageSizes);
        }
        if self.page_sizes.contains(&0) {
            return Err(ConfigError::ZeroPageSize);
        }
        if !self.allows_page_size(self.page_size) {
            return Err(ConfigError::PageSizeNotAllowed {
                size: self.page_size,
                allowed: self.page_sizes.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = TableConfig::<String>::new();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.search_debounce(), Duration::from_millis(300));
    }

    #[test]
    fn test_rejects_bad_page_sizes() {
        let config = TableConfig::<String>::new().with_page_sizes([]);
        assert_eq!(config.validate(), Err(ConfigError::EmptyPageSizes));

        let config = TableConfig::<String>::new().with_page_sizes([0, 10]);
        assert_eq!(config.validate(), Err(ConfigError::ZeroPageSize));

        let config = TableConfig::<String>::new().with_page_size(7);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PageSizeNotAllowed { size: 7, .. })
        ));
    }

    #[test]
    fn test_filterable_keys() {
        let config = TableConfig::new().with_filterable_keys(["role".to_string()]);
        assert!(config.allows_filter(&"role".to_string()));
        assert!(!config.allows_filter(&"name".to_string()));
        assert!(TableConfig::<String>::new().allows_filter(&"name".to_string()));
    }
}
