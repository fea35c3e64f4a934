//! Error types for the catalog client.

use reqwest::StatusCode;
use std::time::Duration;

/// Errors returned by catalog sessions and access operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Connection, DNS or TLS failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure surfaced by the retry middleware after its last attempt
    #[error("HTTP request error: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// No object with that ID (404)
    #[error("Object not found: {0}")]
    NotFound(String),

    /// Login rejected (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Principal lacks access to the object (403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Service kept answering 429 until retries ran out
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        retry_after: Option<Duration>,
        request_id: Option<String>,
    },

    /// Object update refused (409), e.g. a stale object version
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other non-success status
    #[error("Server error ({status}): {message}")]
    ServerError {
        status: u16,
        message: String,
        request_id: Option<String>,
    },

    /// Body was not the JSON shape the endpoint documents
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Update payload rejected locally; nothing was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Payload could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid [`ClientConfig`](crate::ClientConfig)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Whether the failure is one the connection retries: rate limiting,
    /// 5xx responses, timeouts and refused connections.
    ///
    /// An error of this kind reaching the caller means the retry budget
    /// was spent.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::RateLimited { .. } => true,
            ClientError::ServerError { status, .. } => {
                StatusCode::from_u16(*status).is_ok_and(is_transient_status)
            }
            ClientError::Http(e) => e.is_timeout() || e.is_connect(),
            ClientError::HttpMiddleware(e) => is_transient_transport(e),
            _ => false,
        }
    }
}

/// Statuses worth repeating a request for.
pub(crate) fn is_transient_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

pub(crate) fn is_transient_transport(error: &reqwest_middleware::Error) -> bool {
    error.is_timeout() || error.is_connect()
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
