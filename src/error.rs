//! Error types for the quasar-docs-mcp server.
//!
//! This module defines all error types used throughout the application,
//! organized by subsystem: remote fetching, tool input validation, and
//! configuration.
//!
//! Remote failures deserve a note: the fetch layer records upstream errors
//! internally (see [`crate::docs::fetcher::Fetched`]) but collapses them to
//! "not found" / "empty" at the tool boundary, so only startup problems ever
//! surface through these types as fatal.

use thiserror::Error;

/// Errors raised while talking to the remote documentation source.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP request itself failed (connect, timeout, TLS).
    #[error("request failed: {0}")]
    Request(String),

    /// The remote answered with a non-success status.
    #[error("unexpected HTTP status {status} for {path}")]
    Status {
        /// The HTTP status code received.
        status: u16,
        /// The remote path that was requested.
        path: String,
    },

    /// The response body could not be decoded or parsed.
    #[error("failed to decode response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Request(err.to_string())
    }
}

/// Validation errors for tool inputs.
///
/// These are produced before any core logic runs and are surfaced to the
/// MCP client as structured invalid-params errors naming the violated
/// constraint.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required string parameter was empty.
    #[error("'{field}' must not be empty")]
    Empty {
        /// The parameter name.
        field: &'static str,
    },

    /// A string parameter exceeded its maximum length.
    #[error("'{field}' exceeds the maximum length of {max} characters")]
    TooLong {
        /// The parameter name.
        field: &'static str,
        /// The maximum allowed length.
        max: usize,
    },

    /// A numeric parameter fell outside its allowed range.
    #[error("'{field}' must be between {min} and {max}")]
    OutOfRange {
        /// The parameter name.
        field: &'static str,
        /// The minimum allowed value.
        min: usize,
        /// The maximum allowed value.
        max: usize,
    },
}

/// A unified error type for the entire application.
#[derive(Debug, Error)]
pub enum Error {
    /// Remote fetch error.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Tool input validation error.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for quasar-docs-mcp operations.
pub type Result<T> = std::result::Result<T, Error>;
