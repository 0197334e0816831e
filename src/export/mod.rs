//! Export functionality
//!
//! Provides:
//! - SQL DDL synthesis from forms
//! - Record export requests and materialization of exported rows

pub mod records;
pub mod sql;

/// Result of an export operation
#[derive(Debug)]
pub struct ExportResult {
    /// Exported content
    pub content: String,
    /// Format identifier
    pub format: String,
}

/// Error during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("The provided SQL dialect ({0}) is not supported")]
    UnsupportedDialect(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub use records::{ExportParameters, materialize_records};
pub use sql::{SqlDialect, SqlExporter};
