//! Export error types

/// Errors that can occur while serializing rows to CSV.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The CSV writer rejected a record.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// The underlying buffer could not be flushed or recovered.
    #[error("CSV buffer error: {0}")]
    Io(#[from] std::io::Error),
}
