//! Mutable view state of one table.

use super::ColumnKey;
use super::Filters;
use super::SearchQuery;
use super::Selection;
use super::SortState;
use super::TableConfig;

/// Sort, filter, search, pagination and selection state of one table.
///
/// Owned by a [`TableController`](super::TableController); every table has
/// its own.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<K: ColumnKey> {
    /// Current page, 1-indexed.
    pub page: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Active sort.
    pub sort: SortState<K>,
    /// Free-text search.
    pub search: SearchQuery,
    /// Column filters.
    pub filters: Filters<K>,
    /// Selected row IDs.
    pub selection: Selection,
}

impl<K: ColumnKey> ViewState<K> {
    /// Initial state for a config: first page, no search, no filters.
    pub fn initial(config: &TableConfig<K>) -> Self {
        Self {
            page: 1,
            page_size: config.page_size,
            sort: config.sort.clone(),
            search: SearchQuery::default(),
            filters: Filters::new(),
            selection: Selection::new(),
        }
    }

    /// Back to page 1 with nothing selected.
    pub(crate) fn reset_view(&mut self) {
        self.page = 1;
        self.selection.clear();
    }
}
