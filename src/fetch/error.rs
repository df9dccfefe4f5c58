use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Why an upstream fetch failed, after all retries were exhausted.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request for {url} timed out after {timeout:?} (attempt {attempt})")]
    Timeout {
        url: String,
        timeout: Duration,
        attempt: u32,
    },

    #[error("Failed to decode response body from {url}")]
    InvalidBody {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// The user-facing degraded-mode banner text for this failure.
    ///
    /// Client errors (4xx), server errors (5xx), timeouts, and transport
    /// failures each get a distinct message so the UI can tell the user
    /// whether the problem is the query, the service, or the network.
    pub fn notice(&self) -> String {
        match self {
            FetchError::HttpStatus { status, .. } if status.is_client_error() => format!(
                "The rainfall service rejected the request ({status}). Showing sample data."
            ),
            FetchError::HttpStatus { status, .. } => format!(
                "The rainfall service is having trouble ({status}). Showing sample data."
            ),
            FetchError::Timeout { .. } => {
                "The rainfall service is not responding. Showing sample data.".to_string()
            }
            FetchError::NetworkRequest(..) => {
                "Cannot reach the rainfall service; check the network connection. \
                 Showing sample data."
                    .to_string()
            }
            FetchError::InvalidBody { .. } => {
                "The rainfall service returned unreadable data. Showing sample data."
                    .to_string()
            }
        }
    }
}
