//! Newsletter signup flow.

use inkpress_api::{is_valid_email, ApiClient};

/// Outcome of a subscribe attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Subscribed,
    MissingEmail,
    InvalidEmail,
    /// The store rejected the write (commonly an already-subscribed email).
    Failed,
}

/// Subscribe an email address, validating before any remote call.
pub async fn subscribe(client: &ApiClient, email: &str, name: &str) -> SubscribeOutcome {
    let email = email.trim();
    if email.is_empty() {
        return SubscribeOutcome::MissingEmail;
    }
    if !is_valid_email(email) {
        return SubscribeOutcome::InvalidEmail;
    }

    let name = name.trim();
    let name = if name.is_empty() { None } else { Some(name) };

    if client.subscribe_to_newsletter(email, name).await {
        SubscribeOutcome::Subscribed
    } else {
        SubscribeOutcome::Failed
    }
}
