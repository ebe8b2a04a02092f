//! Schema types for representing inferred table structure.

mod field;
mod table;
mod types;

pub use field::{FieldConstraints, FieldSchema};
pub use table::DataSchema;
pub use types::{Domain, FieldType};
