//! Field type inference and schema construction.

mod field_type;
mod schema_builder;

pub use field_type::{medical_code_system, FieldTypeInferrer};
pub use schema_builder::SchemaBuilder;
