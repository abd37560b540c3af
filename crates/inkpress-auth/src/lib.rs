//! Authentication for the inkpress client.
//!
//! This crate provides:
//! - A GoTrue REST client (password grant, refresh, user fetch, logout)
//! - Session management with expiry-based token refresh
//! - Disk persistence of the session under the client base directory
//!
//! The session is an explicitly-owned object handed to consumers by the
//! application, not an ambient singleton; only the auth flow mutates it.

mod error;
mod gotrue;
mod session;

pub use error::{AuthError, AuthResult};
pub use gotrue::{AuthUser, GoTrueClient, TokenResponse};
pub use session::{AuthSession, AuthStatus, SessionManager, REFRESH_SLACK_SECS};
