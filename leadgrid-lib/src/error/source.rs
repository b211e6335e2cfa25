//! Row source error types

/// Errors raised by a [`RowSource`](crate::source::RowSource).
///
/// These belong to the data-fetching collaborator. The table controller
/// never produces them; callers surface them next to the table.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The backend could not deliver the rows.
    #[error("Fetch failed: {message}")]
    Fetch {
        /// Description of the failure.
        message: String,
        /// Whether retrying the fetch may succeed.
        retryable: bool,
    },

    /// The backend answered with a body that is not a row collection.
    #[error("Row decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SourceError {
    /// Creates a non-retryable fetch error.
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
            retryable: false,
        }
    }

    /// Creates a fetch error that may succeed when retried.
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
            retryable: true,
        }
    }

    /// Returns `true` if this error is potentially retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Fetch { retryable, .. } => *retryable,
            Self::Decode(_) => false,
        }
    }
}
