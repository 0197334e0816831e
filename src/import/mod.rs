//! Import functionality
//!
//! Provides parsers for the payloads returned by the REDCap API:
//! - Metadata (data dictionary) into [`Field`](crate::models::Field)s
//! - Events and arms of longitudinal projects

pub mod events;
pub mod metadata;

/// Error while parsing a metadata payload.
///
/// Metadata integrity is a precondition: any of these aborts the fetch.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Metadata record {index} is not a JSON object")]
    NotAnObject { index: usize },
    #[error("Metadata record {index}: attribute '{attribute}' is missing or not a string")]
    MissingAttribute { index: usize, attribute: String },
    #[error("Field '{field}': invalid choice '{segment}': {reason}")]
    InvalidChoice {
        field: String,
        segment: String,
        reason: String,
    },
    #[error("Duplicate field name '{0}' in metadata")]
    DuplicateField(String),
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::ParseError(err.to_string())
    }
}

pub use events::{parse_arms, parse_events};
pub use metadata::{parse_choices, parse_field, parse_metadata};
