//! Input parsing and in-memory table representation.

mod parser;
mod source;

pub use parser::{Parser, ParserConfig};
pub use source::{is_null_token, CellValue, DataTable, SourceMetadata};
