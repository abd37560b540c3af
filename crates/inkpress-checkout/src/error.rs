//! Error types for the payment boundary.

use thiserror::Error;

/// Error produced by the checkout functions.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// HTTP transport error (the function never answered)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The function answered with a non-success status
    #[error("{context}: {status} ({body_summary})")]
    Status {
        context: &'static str,
        status: reqwest::StatusCode,
        body_summary: String,
    },

    /// The function answered success but without the expected payload
    #[error("{0}: malformed response")]
    MalformedResponse(&'static str),
}

/// Result type alias using CheckoutError.
pub type CheckoutResult<T> = Result<T, CheckoutError>;
