//! Table controller

use std::collections::HashSet;

use log::debug;
use log::trace;
use log::warn;

use super::Column;
use super::ColumnKey;
use super::FilterValue;
use super::Filters;
use super::PageItem;
use super::PageSummary;
use super::SearchQuery;
use super::SelectAllState;
use super::SortState;
use super::TableConfig;
use super::TableRow;
use super::TableView;
use super::ViewState;
use super::compare_values;
use super::derive_order;
use super::page;
use crate::error::ConfigError;
use crate::error::ExportError;
use crate::export::CsvExport;
use crate::export::CsvOptions;
use crate::export::ExportScope;
use crate::export::SELECTION_FILE_NAME;
use crate::export::TABLE_FILE_NAME;
use crate::export::to_csv_with;
use crate::model::RowId;
use crate::model::Value;

/// Client-side table over an in-memory row collection.
///
/// The controller owns the rows, the column descriptors and the
/// [`ViewState`]. UI controls call its command methods; after every command
/// the visible order is recomputed from `{rows, search, filters, sort}` and
/// the page is clamped into range. Commands never fail: bad arguments are
/// clamped or ignored with a log warning, so the view is always renderable.
///
/// Changing the search, a filter or the sort resets the page to 1 and clears
/// the selection. Selected rows always belong to the filtered set.
///
/// # Example
///
/// ```
/// use leadgrid_lib::model::Record;
/// use leadgrid_lib::table::{Column, FilterValue, TableConfig, TableController};
///
/// let rows: Vec<Record> = (1..=57)
///     .map(|i| {
///         Record::new(i)
///             .set("name", format!("User {i}"))
///             .set("role", if i % 2 == 1 { "Admin" } else { "User" })
///     })
///     .collect();
///
/// let columns = vec![
///     Column::new("name", "Name").sortable().searchable(),
///     Column::new("role", "Role"),
/// ];
///
/// let mut table = TableController::new(rows, columns, TableConfig::default()).unwrap();
/// table.set_filter("role".to_string(), FilterValue::one("Admin"));
/// assert_eq!(table.total_count(), 29);
///
/// table.set_search("user 5");
/// assert_eq!(table.total_count(), 5);
/// ```
pub struct TableController<R: TableRow> {
    rows: Vec<R>,
    columns: Vec<Column<R>>,
    config: TableConfig<R::Key>,
    searchable: Vec<R::Key>,
    state: ViewState<R::Key>,
    // Indices into `rows`, filtered and sorted.
    order: Vec<usize>,
}

impl<R: TableRow> TableController<R> {
    /// Creates a controller.
    ///
    /// Fails when the configuration is malformed: bad page sizes, duplicate
    /// column keys, or configured keys that name no column. An initial sort
    /// must name a sortable column.
    pub fn new(
        rows: Vec<R>,
        columns: Vec<Column<R>>,
        config: TableConfig<R::Key>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(&column.key) {
                return Err(ConfigError::DuplicateColumn {
                    key: column.key.name().to_string(),
                });
            }
        }

        let find = |key: &R::Key| columns.iter().find(|column| &column.key == key);

        if let Some(key) = &config.sort.key {
            match find(key) {
                None => return Err(ConfigError::unknown_column(key.name())),
                Some(column) if !column.sortable => {
                    return Err(ConfigError::sort_not_allowed(key.name()));
                }
                Some(_) => {}
            }
        }

        let configured = config.searchable_keys.iter().chain(&config.filterable_keys);
        for key in configured.flatten() {
            if find(key).is_none() {
                return Err(ConfigError::unknown_column(key.name()));
            }
        }

        let searchable = match &config.searchable_keys {
            Some(keys) => keys.clone(),
            None => columns
                .iter()
                .filter(|column| column.searchable)
                .map(|column| column.key.clone())
                .collect(),
        };

        let state = ViewState::initial(&config);
        let mut controller = Self {
            rows,
            columns,
            config,
            searchable,
            state,
            order: Vec::new(),
        };
        controller.recompute();
        Ok(controller)
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Sets the free-text search.
    ///
    /// When the query matches differently than before, the page resets to 1
    /// and the selection is cleared.
    pub fn set_search(&mut self, query: impl Into<String>) {
        let query = SearchQuery::new(query);
        let changed = !query.is_equivalent(&self.state.search);
        self.state.search = query;
        if changed {
            debug!("Search set to {:?}", self.state.search.as_str());
            self.state.reset_view();
            self.recompute();
        }
    }

    /// Sets the filter of one column.
    ///
    /// [`FilterValue::All`] (and an empty multi-select) removes the column's
    /// filter. Keys that name no column, or that are not filterable, are
    /// ignored.
    pub fn set_filter(&mut self, key: R::Key, value: impl Into<FilterValue>) {
        if self.column(&key).is_none() {
            warn!("Ignoring filter on unknown column '{}'", key.name());
            return;
        }
        if !self.config.allows_filter(&key) {
            warn!("Ignoring filter on non-filterable column '{}'", key.name());
            return;
        }

        let value = value.into();
        debug!("Filter '{}' set to {:?}", key.name(), value);
        if self.state.filters.set(key, value) {
            self.state.reset_view();
            self.recompute();
        }
    }

    /// Removes every column filter.
    pub fn clear_filters(&mut self) {
        if self.state.filters.clear() {
            debug!("Filters cleared");
            self.state.reset_view();
            self.recompute();
        }
    }

    /// Header click on a column.
    ///
    /// Sorting by the current column flips the direction; another column
    /// starts ascending. Columns that are not sortable are ignored.
    pub fn set_sort(&mut self, key: &R::Key) {
        match self.column(key) {
            Some(column) if column.sortable => {}
            Some(_) => {
                debug!("Column '{}' is not sortable", key.name());
                return;
            }
            None => {
                debug!("Ignoring sort on unknown column '{}'", key.name());
                return;
            }
        }

        self.state.sort.toggle(key.clone());
        debug!(
            "Sort set to '{}' {:?}",
            key.name(),
            self.state.sort.direction
        );
        self.state.reset_view();
        self.recompute();
    }

    /// Removes the sort; rows return to their input order.
    pub fn clear_sort(&mut self) {
        if self.state.sort.key.is_some() {
            debug!("Sort cleared");
            self.state.sort.clear();
            self.state.reset_view();
            self.recompute();
        }
    }

    /// Goes to a page, clamped into `[1, total_pages]`.
    pub fn set_page(&mut self, page: usize) {
        let clamped = page::clamp_page(page, self.total_pages());
        if clamped != page {
            debug!("Page {} clamped to {}", page, clamped);
        }
        self.state.page = clamped;
    }

    /// Goes to the next page, if any.
    pub fn next_page(&mut self) {
        self.set_page(self.state.page + 1);
    }

    /// Goes to the previous page, if any.
    pub fn prev_page(&mut self) {
        self.set_page(self.state.page.saturating_sub(1));
    }

    /// Changes the page size and goes back to page 1.
    ///
    /// Sizes that are not in the configured list are ignored.
    pub fn set_page_size(&mut self, page_size: usize) {
        if !self.config.allows_page_size(page_size) {
            warn!(
                "Ignoring page size {} (allowed: {:?})",
                page_size, self.config.page_sizes
            );
            return;
        }
        debug!("Page size set to {}", page_size);
        self.state.page_size = page_size;
        self.state.page = 1;
    }

    /// Selects or deselects one row.
    ///
    /// Only rows passing the current search and filters can be selected.
    /// Returns `true` if the selection changed.
    pub fn toggle_row_selected(&mut self, id: RowId, selected: bool) -> bool {
        if selected && !self.is_visible(&id) {
            warn!("Ignoring selection of row {} outside the current view", id);
            return false;
        }
        self.state.selection.set(id, selected)
    }

    /// Header checkbox: selects exactly the rows on the current page, or
    /// clears the selection.
    pub fn toggle_select_all_visible(&mut self, selected: bool) {
        if selected {
            let ids = self.page_ids();
            debug!("Selecting {} rows on page {}", ids.len(), self.state.page);
            self.state.selection.replace(ids);
        } else {
            self.state.selection.clear();
        }
    }

    /// Shift+click: selects the rows of the current page between the
    /// selection anchor and `id`.
    ///
    /// With `extend` the rows are added to the selection, otherwise they
    /// replace it.
    pub fn select_range_to(&mut self, id: &RowId, extend: bool) {
        if !self.is_visible(id) {
            warn!("Ignoring range selection to row {} outside the current view", id);
            return;
        }
        let ids = self.page_ids();
        let (added, removed) = self.state.selection.range_select(id, &ids, extend);
        trace!("Range select: +{} -{}", added.len(), removed.len());
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.state.selection.clear();
    }

    /// Replaces the rows, e.g. after a re-fetch.
    ///
    /// Search, filters, sort and page size are kept. Selected IDs that are
    /// still in the filtered rows stay selected, and the page is clamped to
    /// the new page count.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        debug!("Replacing {} rows with {}", self.rows.len(), rows.len());
        self.rows = rows;
        self.recompute();

        let visible: HashSet<RowId> = self.order.iter().map(|&i| self.rows[i].id()).collect();
        let dropped = self.state.selection.retain(|id| visible.contains(id));
        if dropped > 0 {
            debug!("Dropped {} selected rows no longer present", dropped);
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Rows on the current page, in display order.
    pub fn page_rows(&self) -> Vec<&R> {
        self.page_order().iter().map(|&i| &self.rows[i]).collect()
    }

    /// Every row passing search and filters, in display order.
    pub fn filtered_rows(&self) -> Vec<&R> {
        self.order.iter().map(|&i| &self.rows[i]).collect()
    }

    /// Selected rows, in display order.
    pub fn selected_rows(&self) -> Vec<&R> {
        self.order
            .iter()
            .map(|&i| &self.rows[i])
            .filter(|row| self.state.selection.is_selected(&row.id()))
            .collect()
    }

    /// Number of rows passing search and filters.
    pub fn total_count(&self) -> usize {
        self.order.len()
    }

    /// Number of pages; at least one.
    pub fn total_pages(&self) -> usize {
        page::total_pages(self.total_count(), self.state.page_size)
    }

    /// Current page, 1-indexed.
    pub fn page(&self) -> usize {
        self.state.page
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.state.page_size
    }

    /// Active sort.
    pub fn sort(&self) -> &SortState<R::Key> {
        &self.state.sort
    }

    /// Search text as typed.
    pub fn search_query(&self) -> &str {
        self.state.search.as_str()
    }

    /// Active column filters.
    pub fn filters(&self) -> &Filters<R::Key> {
        &self.state.filters
    }

    /// Selected row IDs, sorted.
    pub fn selected_ids(&self) -> Vec<RowId> {
        self.state.selection.selected()
    }

    /// Returns `true` if the row is selected.
    pub fn is_selected(&self, id: &RowId) -> bool {
        self.state.selection.is_selected(id)
    }

    /// Header checkbox state for the current page.
    pub fn select_all_state(&self) -> SelectAllState {
        SelectAllState::of(&self.state.selection, &self.page_ids())
    }

    /// Page-number strip for the current page.
    pub fn page_strip(&self) -> Vec<PageItem> {
        page::page_strip(
            self.state.page,
            self.total_pages(),
            self.config.page_strip_delta,
        )
    }

    /// "first-last of total" numbers for the current page.
    pub fn summary(&self) -> PageSummary {
        PageSummary::new(self.state.page, self.state.page_size, self.total_count())
    }

    /// Distinct non-null values of a column across all rows, sorted.
    ///
    /// List values contribute their elements. Used to populate filter
    /// drop-downs.
    pub fn distinct_values(&self, key: &R::Key) -> Vec<Value> {
        let mut values = Vec::new();
        for row in &self.rows {
            match row.value(key).into_owned() {
                Value::Null => {}
                Value::List(items) => values.extend(items.into_iter().filter(|v| !v.is_null())),
                value => values.push(value),
            }
        }
        values.sort_by(compare_values);
        values.dedup_by(|a, b| a.loosely_eq(b));
        values
    }

    /// Snapshot of everything the table renders.
    pub fn view(&self) -> TableView<'_, R> {
        let page_rows = self.page_rows();
        let page_ids: Vec<RowId> = page_rows.iter().map(|row| row.id()).collect();
        TableView {
            page_rows,
            total_count: self.total_count(),
            total_pages: self.total_pages(),
            page: self.state.page,
            page_size: self.state.page_size,
            sort: &self.state.sort,
            search_query: self.state.search.as_str(),
            filters: &self.state.filters,
            selected_ids: self.selected_ids(),
            select_all: SelectAllState::of(&self.state.selection, &page_ids),
            page_strip: self.page_strip(),
            summary: self.summary(),
        }
    }

    /// Column descriptors.
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Column with the given key.
    pub fn column(&self, key: &R::Key) -> Option<&Column<R>> {
        self.columns.iter().find(|column| &column.key == key)
    }

    /// All rows, in input order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Columns searched by free text.
    pub fn searchable_keys(&self) -> &[R::Key] {
        &self.searchable
    }

    /// Table configuration.
    pub fn config(&self) -> &TableConfig<R::Key> {
        &self.config
    }

    /// Current view state.
    pub fn state(&self) -> &ViewState<R::Key> {
        &self.state
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Serializes rows to CSV with default options.
    pub fn export_csv(&self, scope: ExportScope) -> Result<CsvExport, ExportError> {
        self.export_csv_with(scope, &CsvOptions::default())
    }

    /// Serializes rows to CSV.
    ///
    /// Fields use each column's renderer, else the value's default string
    /// coercion.
    pub fn export_csv_with(
        &self,
        scope: ExportScope,
        options: &CsvOptions,
    ) -> Result<CsvExport, ExportError> {
        let (rows, file_name) = match scope {
            ExportScope::CurrentPage => (self.page_rows(), TABLE_FILE_NAME),
            ExportScope::Filtered => (self.filtered_rows(), TABLE_FILE_NAME),
            ExportScope::Selected => (self.selected_rows(), SELECTION_FILE_NAME),
        };
        debug!("Exporting {} rows ({:?}) to {}", rows.len(), scope, file_name);
        let bytes = to_csv_with(rows, &self.columns, options)?;
        Ok(CsvExport::new(file_name, bytes))
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn recompute(&mut self) {
        self.order = derive_order(
            &self.rows,
            &self.searchable,
            &self.state.search,
            &self.state.filters,
            &self.state.sort,
        );
        self.state.page = page::clamp_page(self.state.page, self.total_pages());
        trace!(
            "Recomputed view: {} of {} rows, page {}/{}",
            self.order.len(),
            self.rows.len(),
            self.state.page,
            self.total_pages()
        );
    }

    fn page_order(&self) -> &[usize] {
        let bounds = page::page_bounds(self.state.page, self.state.page_size, self.order.len());
        &self.order[bounds]
    }

    fn page_ids(&self) -> Vec<RowId> {
        self.page_order().iter().map(|&i| self.rows[i].id()).collect()
    }

    fn is_visible(&self, id: &RowId) -> bool {
        self.order.iter().any(|&i| &self.rows[i].id() == id)
    }
}

impl<R: TableRow + std::fmt::Debug> std::fmt::Debug for TableController<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableController")
            .field("rows", &self.rows.len())
            .field("columns", &self.columns)
            .field("state", &self.state)
            .finish()
    }
}
