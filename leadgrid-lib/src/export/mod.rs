//! CSV export of table rows

mod writer;

pub use writer::*;

/// File name offered for exports of the table view.
pub const TABLE_FILE_NAME: &str = "table.csv";

/// File name offered for exports of the selected rows.
pub const SELECTION_FILE_NAME: &str = "selected-rows.csv";

/// MIME type of CSV exports.
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Which rows of a table an export contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportScope {
    /// Rows on the current page.
    #[default]
    CurrentPage,
    /// Every row passing search and filters, across all pages.
    Filtered,
    /// The selected rows.
    Selected,
}

/// A finished CSV file, ready to hand to a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// Suggested file name.
    pub file_name: String,
    /// UTF-8 CSV content.
    pub bytes: Vec<u8>,
}

impl CsvExport {
    /// Creates an export.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// MIME type of the content.
    pub fn content_type(&self) -> &'static str {
        CSV_CONTENT_TYPE
    }

    /// Content as text, without a byte order mark.
    ///
    /// Returns `None` if the bytes are not valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        let bytes = self.bytes.strip_prefix(UTF8_BOM).unwrap_or(&self.bytes);
        std::str::from_utf8(bytes).ok()
    }
}
