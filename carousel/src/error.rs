//! Error types for the carousel crate

use thiserror::Error;

/// Errors raised while loading slides from a data source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    Request(String),

    /// Response body could not be parsed
    #[error("Response parsing failed: {0}")]
    Parse(String),

    /// Server answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Server answered 2xx but reported failure in the response envelope
    #[error("Request rejected: {}", errors.join("; "))]
    Rejected {
        /// Error messages from the envelope
        errors: Vec<String>,
    },
}

/// Invalid configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A duration that must be positive was zero
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    /// The number of slides to show was zero
    #[error("popular_limit must be greater than zero")]
    ZeroLimit,

    /// A URL setting is empty
    #[error("{0} must not be empty")]
    EmptyUrl(&'static str),
}
