//! Top-level error type for project operations

use crate::import::ImportError;
use crate::transport::TransportError;

/// Error returned by [`Project`](crate::project::Project) operations.
///
/// Variants that relate to a remote call name the API `content` that failed
/// (`metadata`, `event`, `arm`, `record`).
#[derive(Debug, thiserror::Error)]
pub enum RedcapError {
    #[error("REDCap '{content}' request failed: {source}")]
    Transport {
        content: &'static str,
        #[source]
        source: TransportError,
    },
    #[error("REDCap '{content}' request returned HTTP {status}: {body}")]
    Status {
        content: &'static str,
        status: u16,
        body: String,
    },
    #[error("Error parsing REDCap metadata: {0}")]
    Metadata(#[from] ImportError),
    #[error("REDCap metadata is empty; no unique key can be designated")]
    EmptyMetadata,
    #[error("Error parsing REDCap records: {0}")]
    RecordPayload(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for project operations
pub type Result<T> = std::result::Result<T, RedcapError>;
