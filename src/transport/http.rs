//! HTTP transport
//!
//! Blocking `reqwest` client with an explicit request timeout.

use super::{ApiResponse, Transport, TransportError};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Transport that talks to a REDCap server over HTTP(S)
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HttpTransport {
    /// Create a transport whose requests time out after `timeout_secs`
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use redcap_sdk::transport::HttpTransport;
    ///
    /// let transport = HttpTransport::new(60).unwrap();
    /// ```
    pub fn new(timeout_secs: u64) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| TransportError::ClientError(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Transport for HttpTransport {
    fn post_form(&self, url: &str, form: &[(&str, String)]) -> Result<ApiResponse, TransportError> {
        let response = self.client.post(url).form(form).send().map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(self.timeout_secs)
            } else {
                TransportError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(self.timeout_secs)
            } else {
                TransportError::BodyError(e.to_string())
            }
        })?;

        debug!("POST {} -> HTTP {} ({} bytes)", url, status, body.len());

        Ok(ApiResponse::new(status, body.to_vec()))
    }
}
