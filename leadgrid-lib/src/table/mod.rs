//! Client-side table: search, filters, sort, pagination and selection over
//! an in-memory row collection.
//!
//! [`TableController`] is the entry point. The building blocks it is made of
//! ([`Filters`], [`SearchQuery`], [`SortState`], [`Selection`], the paging
//! helpers) are public so a UI can reuse them on their own.

mod column;
mod config;
mod controller;
mod filter;
mod page;
mod row;
mod search;
mod selection;
mod sort;
mod state;
mod view;

pub use column::*;
pub use config::*;
pub use controller::*;
pub use filter::*;
pub use page::*;
pub use row::*;
pub use search::*;
pub use selection::*;
pub use sort::SortDirection;
pub use sort::SortState;
pub use sort::compare_values;
pub use state::*;
pub use view::*;
