//! Data-access layer for the inkpress platform.
//!
//! Each public operation maps one application intent to exactly one remote
//! table operation (plus the documented multi-step exceptions: toggles,
//! category/bookmark post resolution, and the composite profile-with-stats
//! fetch) and normalizes the outcome:
//!
//! - read-single → `Option<T>` (not-found and transient failure both yield
//!   `None`; failures are logged)
//! - read-collection → `Vec<T>` (empty on any failure)
//! - write → `Option<T>` for create/update, `bool` for delete
//! - toggle → `bool` success
//! - count → `u64`, zero on failure
//!
//! No operation retries, and no failure crosses this boundary as an error on
//! a read path; callers interpret neutral results.

mod analytics;
mod client;
mod comments;
mod engagement;
mod error;
mod newsletter;
mod orders;
mod posts;
mod profiles;
mod taxonomy;

pub use client::ApiClient;
pub use engagement::ToggleAction;
pub use error::{ApiError, ApiResult};
pub use newsletter::is_valid_email;
pub use posts::PostScope;
