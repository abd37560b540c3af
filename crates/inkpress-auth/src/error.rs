//! Error types for authentication operations.

use thiserror::Error;

/// Error type for auth operations.
#[derive(Error, Debug)]
pub enum AuthError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The auth server rejected the request (bad credentials, expired
    /// refresh token, revoked session)
    #[error("Auth rejected: {0}")]
    Rejected(String),

    /// No session is present where one is required
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Session persistence error
    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using AuthError.
pub type AuthResult<T> = Result<T, AuthError>;
