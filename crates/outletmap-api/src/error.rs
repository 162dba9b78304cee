use outletmap_core::{Failure, FailureKind};
use thiserror::Error;

/// Errors returned by the outlet backend client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl ApiError {
    /// Classify this error for the application state.
    #[must_use]
    pub fn failure(&self) -> Failure {
        let kind = match self {
            ApiError::Deserialize { .. } => FailureKind::MalformedResponse,
            ApiError::Http(e) if e.is_decode() => FailureKind::MalformedResponse,
            ApiError::Http(_) | ApiError::UnexpectedStatus { .. } | ApiError::InvalidBaseUrl { .. } => {
                FailureKind::Transport
            }
        };
        Failure {
            kind,
            message: self.to_string(),
        }
    }
}
