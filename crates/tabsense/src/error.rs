//! Error types for the Tabsense library.
//!
//! Only structural problems with the input surface here. Data-quality findings
//! are never errors; they are recorded in the [`QualityReport`](crate::QualityReport).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Tabsense operations.
#[derive(Debug, Error)]
pub enum TabsenseError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The table has no columns, so no schema can be produced.
    #[error("No columns: {0}")]
    NoColumns(String),

    /// A row whose width differs from the header row.
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Input exceeds the configured size limit.
    #[error("Input is {size_bytes} bytes, limit is {limit_bytes} bytes")]
    FileTooLarge { size_bytes: u64, limit_bytes: u64 },

    /// A domain hint that names no known domain.
    #[error("Unknown domain: '{0}' (expected surgery, logistics, insurance or general)")]
    UnknownDomain(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Tabsense operations.
pub type Result<T> = std::result::Result<T, TabsenseError>;
