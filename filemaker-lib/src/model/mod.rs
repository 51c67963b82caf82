//! Typed models

mod case_map;
mod field;
mod format;
mod layout;
mod record;
mod resultset;
pub mod types;
mod value;

pub use case_map::*;
pub use field::*;
pub use format::*;
pub use layout::*;
pub use record::Record;
pub(crate) use record::RecordContext;
pub(crate) use record::strip_table_prefix;
pub use resultset::*;
pub use value::*;
