//! REDCap SDK - client-side data model for the REDCap metadata API
//!
//! Provides:
//! - Metadata fetching and parsing into typed fields and choices
//! - Grouping of fields into forms and designation of the unique key
//! - Detection of the longitudinal event/arm structure
//! - SQL DDL synthesis from forms (checkbox fan-out, `text` columns)
//! - Record export and materialization onto field definitions

pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod project;
pub mod transport;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::ProjectConfig;
pub use error::{RedcapError, Result};
pub use export::{ExportError, ExportParameters, ExportResult, SqlDialect, SqlExporter};
pub use import::ImportError;
pub use models::{Arm, Choice, Event, Field, FieldType, Form, Record, Validation};
pub use project::{Fetch, Project};
pub use transport::{ApiResponse, HttpTransport, Transport, TransportError};
