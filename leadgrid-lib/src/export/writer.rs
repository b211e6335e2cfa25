//! CSV writer built on the `csv` crate

use csv::QuoteStyle;
use csv::WriterBuilder;

use crate::error::ExportError;
use crate::table::Column;
use crate::table::TableRow;

/// UTF-8 byte order mark.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Options for writing CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// Write a header row of column labels.
    pub include_header: bool,
    /// Field delimiter.
    pub delimiter: u8,
    /// Prefix the output with a UTF-8 byte order mark, so spreadsheet
    /// programs detect the encoding.
    pub bom: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            include_header: true,
            delimiter: b',',
            bom: false,
        }
    }
}

impl CsvOptions {
    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enables or disables the byte order mark.
    pub fn with_bom(mut self, bom: bool) -> Self {
        self.bom = bom;
        self
    }

    /// Enables or disables the header row.
    pub fn with_header(mut self, include_header: bool) -> Self {
        self.include_header = include_header;
        self
    }
}

/// Serializes rows to CSV with default options.
///
/// The header row holds the column labels; each row becomes one record with
/// one field per column, in column order. Fields are the column's rendered
/// text. Commas, quotes and line breaks are quoted.
///
/// # Example
///
/// ```
/// use leadgrid_lib::export::to_csv;
/// use leadgrid_lib::model::Record;
/// use leadgrid_lib::table::Column;
///
/// let rows = vec![Record::new(1).set("name", "Smith, Jane")];
/// let columns = vec![Column::new("id", "ID"), Column::new("name", "Name")];
///
/// let bytes = to_csv(&rows, &columns).unwrap();
/// assert_eq!(String::from_utf8(bytes).unwrap(), "ID,Name\n1,\"Smith, Jane\"\n");
/// ```
pub fn to_csv<'a, R: TableRow>(
    rows: impl IntoIterator<Item = &'a R>,
    columns: &[Column<R>],
) -> Result<Vec<u8>, ExportError> {
    to_csv_with(rows, columns, &CsvOptions::default())
}

/// Serializes rows to CSV.
pub fn to_csv_with<'a, R: TableRow>(
    rows: impl IntoIterator<Item = &'a R>,
    columns: &[Column<R>],
    options: &CsvOptions,
) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    if options.bom {
        buffer.extend_from_slice(UTF8_BOM);
    }

    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(buffer);

    if options.include_header {
        writer.write_record(columns.iter().map(|column| column.label.as_str()))?;
    }

    let mut count = 0usize;
    for row in rows {
        writer.write_record(columns.iter().map(|column| column.display(row)))?;
        count += 1;
    }
    log::trace!("Wrote {} CSV records over {} columns", count, columns.len());

    writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))
}
