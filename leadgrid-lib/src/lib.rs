//! Client-side data table library
//!
//! Search, per-column filters, stable sorting, pagination, row selection and
//! CSV export over an in-memory row collection, plus the pieces around it:
//! typed and dynamic row models, a search-box debouncer, and cached row
//! sources for fetching the data.

pub mod cache;
pub mod debounce;
pub mod error;
pub mod export;
pub mod model;
pub mod source;
pub mod table;

pub use source::CacheStatus;
pub use source::Loaded;
pub use table::Column;
pub use table::TableConfig;
pub use table::TableController;
