//! Error types for the trainctl client

use std::time::Duration;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the training server
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection refused, reset, ...)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Server returned a non-success status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body or server-provided message
        message: String,
    },

    /// Response body could not be decoded
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// No response within the allotted time
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }

    /// Check if the request never produced a usable HTTP response
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::RequestFailed(_) | Self::Timeout(_))
    }

    /// Check if this error is a timeout, from either the HTTP client or a caller
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::RequestFailed(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// Check if the response arrived but could not be decoded
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::ParseError(_))
    }
}
