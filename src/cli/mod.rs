//! CLI module for the `redcap` binary

pub mod commands;
pub mod error;
pub mod logging;
pub mod output;

pub use error::CliError;

use crate::config::ProjectConfig;
use std::path::Path;

/// Merge a config file (if any) with command-line / environment overrides.
///
/// Flags win over the file; without a file, url and token are required.
pub fn resolve_config(
    config_path: Option<&Path>,
    url: Option<String>,
    token: Option<String>,
    timeout_secs: Option<u64>,
) -> Result<ProjectConfig, CliError> {
    let mut config = match config_path {
        Some(path) => ProjectConfig::from_file(path)?,
        None => {
            let url = url.clone().ok_or_else(|| {
                CliError::InvalidArgument("--url (or REDCAP_API_URL) is required".to_string())
            })?;
            let token = token.clone().ok_or_else(|| {
                CliError::InvalidArgument("--token (or REDCAP_API_TOKEN) is required".to_string())
            })?;
            ProjectConfig::new(url, token)
        }
    };

    if let Some(url) = url {
        config.url = url;
    }
    if let Some(token) = token {
        config.token = token;
    }
    if let Some(timeout_secs) = timeout_secs {
        config.timeout_secs = timeout_secs;
    }

    config.validate()?;
    Ok(config)
}
