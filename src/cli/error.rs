//! CLI error type

use crate::error::RedcapError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Form not found: {0}")]
    FormNotFound(String),
    #[error("Output error: {0}")]
    OutputError(String),
    #[error(transparent)]
    Redcap(#[from] RedcapError),
}
