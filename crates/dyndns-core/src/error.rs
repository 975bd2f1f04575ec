//! Error types for the dynamic DNS updater
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for updater operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the updater
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The provider answered with a non-success HTTP status
    #[error("HTTP error: status {status}: {message}")]
    Http {
        /// HTTP status code returned by the provider
        status: u16,
        /// Human-readable classification of the failure
        message: String,
    },

    /// Request never produced a usable response (DNS, connect, timeout, read)
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an HTTP status error
    pub fn http(status: u16, msg: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: msg.into(),
        }
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// HTTP status code carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_mentions_status() {
        let err = Error::http(401, "authentication failed");
        assert_eq!(err.status(), Some(401));
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn non_http_errors_have_no_status() {
        assert_eq!(Error::transport("connection refused").status(), None);
        assert_eq!(Error::config("missing key").status(), None);
    }
}
