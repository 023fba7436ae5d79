use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error (status {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// How a failed attempt is treated by the retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request exceeded its timeout.
    Timeout,
    /// No response was received.
    Network,
    /// The server answered, but not with a usable category list.
    Other,
}

/// Maximum length for error response bodies in log output
const MAX_ERROR_BODY_LENGTH: usize = 500;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    pub(crate) fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    /// Build an error from a non-success response, picking up the `message`
    /// field of a JSON error body when the server sent one.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty());
        ApiError::Server {
            status: status.as_u16(),
            message,
        }
    }

    /// Classify a transport-level failure from reqwest.
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(timeout)
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::Timeout(_) => FailureKind::Timeout,
            ApiError::Network(_) => FailureKind::Network,
            ApiError::Server { .. } | ApiError::InvalidResponse(_) => FailureKind::Other,
        }
    }

    /// Timeouts and unreachable servers are worth another attempt; a server
    /// that answered with a failure is not.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), FailureKind::Timeout | FailureKind::Network)
    }

    /// Message supplied by the server in its error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
