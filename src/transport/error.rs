use reqwest::StatusCode;
use thiserror::Error;

/// Failures of the HTTP exchange with the provider.
///
/// URLs stored here never include the query string, so API keys do not end
/// up in error messages or logs.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {} with status {}{}", .url, .status, reason_suffix(.reason))]
    HttpStatus {
        url: String,
        status: StatusCode,
        /// The raw response body, possibly empty.
        body: String,
        /// The `reason` field of a provider error body, when the body had one.
        reason: Option<String>,
    },

    #[error("Failed to decode response body from {0}")]
    Decode(String, #[source] reqwest::Error),
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map(|r| format!(": {r}"))
        .unwrap_or_default()
}

impl TransportError {
    /// The HTTP status, when the provider answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            TransportError::HttpStatus { status, .. } => Some(*status),
            TransportError::NetworkRequest(_, e) | TransportError::Decode(_, e) => e.status(),
            TransportError::ClientBuild(_) => None,
        }
    }

    /// Whether repeating the same request may succeed.
    pub(crate) fn is_transient(&self) -> bool {
        match self {
            TransportError::HttpStatus { status, .. } => {
                super::RETRY_STATUS_CODES.contains(&status.as_u16())
            }
            TransportError::NetworkRequest(_, e) => e.is_timeout() || e.is_connect(),
            TransportError::ClientBuild(_) | TransportError::Decode(..) => false,
        }
    }
}
