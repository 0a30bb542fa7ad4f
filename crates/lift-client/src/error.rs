//! Client error types.

use thiserror::Error;

/// Errors that can occur when talking to the source or target system.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the platform.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Authentication or authorization failure. Never retried.
    #[error("authorization failed ({status})")]
    Unauthorized {
        /// HTTP status code (401 or 403).
        status: u16,
    },

    /// The platform returned a 429 Too Many Requests response.
    #[error("rate limited - retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Failed to parse a response or a source export.
    #[error("parse error: {0}")]
    Parse(String),

    /// Filesystem error while reading a source export.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Whether the resilience policy may retry after this error.
    ///
    /// Transport failures, server-side errors, and rate limiting are
    /// transient. Authorization failures, client-side API errors, and parse
    /// errors are not — retrying would only repeat them.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::RateLimited { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            Self::Unauthorized { .. } | Self::Parse(_) | Self::Io(_) => false,
        }
    }
}
