//! Tabsense: zero-configuration profiling for tabular datasets.
//!
//! Given a table of unknown shape, Tabsense decides which domain it belongs
//! to (surgery, logistics, insurance or general), infers a semantic type and
//! constraints for every column, validates the data against that learned
//! schema, and summarizes it statistically.
//!
//! # Core Principles
//!
//! - **Descriptive schemas**: constraints are learned from the data itself
//! - **Graceful degradation**: empty or messy data lowers scores, it does not fail
//! - **Deterministic**: the same table always yields the same result
//!
//! # Example
//!
//! ```no_run
//! use tabsense::Pipeline;
//!
//! let result = Pipeline::new().process_file("cases.csv", None).unwrap();
//!
//! println!("Domain: {}", result.processing_metadata.domain);
//! println!("Quality: {:.2}", result.quality_report.overall_score());
//! ```

pub mod domain;
pub mod error;
pub mod inference;
pub mod input;
pub mod insight;
pub mod schema;
pub mod stats;
pub mod validation;

mod pipeline;

pub use crate::pipeline::{Pipeline, ProcessingConfig, ProcessingMetadata, ProcessingResult};
pub use domain::{DomainClassifier, DomainPattern, DomainPatterns};
pub use error::{Result, TabsenseError};
pub use inference::{FieldTypeInferrer, SchemaBuilder};
pub use input::{CellValue, DataTable, Parser, ParserConfig, SourceMetadata};
pub use insight::{DomainInsights, InsightConfig, InsightGenerator};
pub use schema::{DataSchema, Domain, FieldConstraints, FieldSchema, FieldType};
pub use validation::{
    DataValidator, QualityGrade, QualityReport, Severity, ValidationError, ValidationErrorKind,
};
