//! Error types for remote-store operations.
//!
//! These never cross the crate boundary on read paths; public functions
//! catch them, log, and degrade to a neutral result.

use thiserror::Error;

/// Error produced by a remote-store round trip.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status
    #[error("{context}: {status} ({body_summary})")]
    Status {
        context: &'static str,
        status: reqwest::StatusCode,
        body_summary: String,
    },

    /// The store's count response was missing or malformed
    #[error("{0}: missing count in response")]
    MissingCount(&'static str),
}

/// Result type alias using ApiError.
pub type ApiResult<T> = Result<T, ApiError>;
