//! Column descriptors.

use std::fmt;
use std::sync::Arc;

use super::TableRow;

/// Maps a row to the text shown (and exported) for one column.
pub type Renderer<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// Column configuration.
///
/// Columns define the structure of the table: which field is shown, the
/// header label, whether the column can be sorted or searched, and an
/// optional renderer. Columns are static configuration, supplied once per
/// table.
///
/// # Examples
///
/// ```
/// use leadgrid_lib::model::Record;
/// use leadgrid_lib::table::Column;
///
/// let columns: Vec<Column<Record>> = vec![
///     Column::new("id", "ID"),
///     Column::new("name", "Name").sortable().searchable(),
///     Column::new("price", "Price")
///         .sortable()
///         .render(|row: &Record| {
///             let price = row.get("price").map(|v| v.to_string());
///             format!("${}", price.unwrap_or_default())
///         }),
/// ];
/// assert!(columns[1].sortable);
/// ```
pub struct Column<R: TableRow> {
    /// Field shown in this column.
    pub key: R::Key,
    /// Column header text.
    pub label: String,
    /// Whether clicking the header sorts by this column.
    pub sortable: bool,
    /// Whether free-text search looks at this column.
    pub searchable: bool,
    render: Option<Renderer<R>>,
}

impl<R: TableRow> Column<R> {
    /// Create a new plain column.
    ///
    /// Columns start neither sortable nor searchable.
    pub fn new(key: impl Into<R::Key>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            searchable: false,
            render: None,
        }
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Include the column in free-text search.
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    /// Set a renderer producing the display text for a row.
    ///
    /// The renderer only affects display and CSV export. Search, filters and
    /// sorting always look at the raw field value.
    pub fn render(mut self, render: impl Fn(&R) -> String + Send + Sync + 'static) -> Self {
        let render: Renderer<R> = Arc::new(render);
        self.render = Some(render);
        self
    }

    /// Returns `true` if the column has a custom renderer.
    pub fn has_renderer(&self) -> bool {
        self.render.is_some()
    }

    /// Display text of this column for a row.
    ///
    /// Uses the renderer when one is set, else the value's default string
    /// coercion.
    pub fn display(&self, row: &R) -> String {
        match &self.render {
            Some(render) => render(row),
            None => row.value(&self.key).to_string(),
        }
    }
}

impl<R: TableRow> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            sortable: self.sortable,
            searchable: self.searchable,
            render: self.render.clone(),
        }
    }
}

impl<R: TableRow> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("searchable", &self.searchable)
            .field("render", &self.render.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
