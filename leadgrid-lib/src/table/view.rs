//! Derived view: filter, search and sort as a pure function.

use super::Filters;
use super::PageItem;
use super::PageSummary;
use super::SearchQuery;
use super::SelectAllState;
use super::SortState;
use super::TableRow;
use super::sort::SortKey;
use crate::model::RowId;

/// Computes the visible order of `rows`.
///
/// Returns the indices of the rows that pass `search` and every filter,
/// sorted by `sort`. Rows that compare equal keep their input order, in both
/// directions. With no sort key the input order is kept as is.
///
/// The result depends only on the arguments.
pub fn derive_order<R: TableRow>(
    rows: &[R],
    searchable: &[R::Key],
    search: &SearchQuery,
    filters: &Filters<R::Key>,
    sort: &SortState<R::Key>,
) -> Vec<usize> {
    let order: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| search.matches(*row, searchable) && filters.matches(*row))
        .map(|(index, _)| index)
        .collect();

    let Some(key) = &sort.key else {
        return order;
    };

    let mut keyed: Vec<(SortKey, usize)> = order
        .into_iter()
        .map(|index| (SortKey::from_value(&rows[index].value(key)), index))
        .collect();
    // sort_by is stable; reversing the comparator keeps ties in input order.
    keyed.sort_by(|(a, _), (b, _)| sort.direction.apply(a.cmp(b)));
    keyed.into_iter().map(|(_, index)| index).collect()
}

/// Read-only snapshot of everything a table renders.
///
/// Produced by [`TableController::view`](super::TableController::view).
#[derive(Debug)]
pub struct TableView<'a, R: TableRow> {
    /// Rows on the current page, in display order.
    pub page_rows: Vec<&'a R>,
    /// Rows passing search and filters, across all pages.
    pub total_count: usize,
    /// Number of pages; at least one.
    pub total_pages: usize,
    /// Current page, 1-indexed.
    pub page: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Active sort.
    pub sort: &'a SortState<R::Key>,
    /// Search text as typed.
    pub search_query: &'a str,
    /// Active column filters.
    pub filters: &'a Filters<R::Key>,
    /// Selected row IDs, sorted.
    pub selected_ids: Vec<RowId>,
    /// Header checkbox state for the current page.
    pub select_all: SelectAllState,
    /// Page-number strip.
    pub page_strip: Vec<PageItem>,
    /// "first-last of total" numbers.
    pub summary: PageSummary,
}

impl<R: TableRow> TableView<'_, R> {
    /// Returns `true` when no row passes search and filters.
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}
