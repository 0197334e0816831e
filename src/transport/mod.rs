//! Transport abstraction
//!
//! Every REDCap API call is a single form-encoded POST to the project URL.
//! The `Transport` trait isolates that exchange so the project model can be
//! driven by the blocking HTTP client in production and by an in-memory fake
//! in tests.

pub mod http;

pub use http::HttpTransport;

/// Error type for transport operations
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),
    #[error("Failed to read response body: {0}")]
    BodyError(String),
    #[error("Failed to build HTTP client: {0}")]
    ClientError(String),
}

/// Raw response of one API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, for diagnostics
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Trait for API transports
///
/// Implementations perform one blocking request and return once the full
/// response body has been read. A non-2xx status is not an error at this
/// level; callers decide what a failed status means for their operation.
pub trait Transport: Send + Sync {
    /// POST `form` as `application/x-www-form-urlencoded` to `url`
    fn post_form(&self, url: &str, form: &[(&str, String)]) -> Result<ApiResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn post_form(&self, url: &str, form: &[(&str, String)]) -> Result<ApiResponse, TransportError> {
        (**self).post_form(url, form)
    }
}
