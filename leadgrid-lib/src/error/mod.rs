//! Error types

mod config;
mod export;
mod field;
mod source;

pub use config::*;
pub use export::*;
pub use field::*;
pub use source::*;
