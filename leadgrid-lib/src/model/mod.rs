//! Row data model

mod record;
mod record_serde;
mod row_id;
mod value;

pub use record::*;
pub use row_id::*;
pub use value::*;
