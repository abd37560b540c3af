//! Newsletter operations.

use crate::client::ApiClient;
use inkpress_types::NewSubscriber;
use tracing::{error, warn};

/// Validate an email address: `local-part@domain.tld`, no whitespace, with
/// a dot somewhere after the `@`.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if email.chars().any(char::is_whitespace) || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

impl ApiClient {
    /// Subscribe an email address to the newsletter. Returns success.
    ///
    /// Malformed addresses are rejected before any remote call is made; a
    /// duplicate subscription surfaces as failure (the store enforces email
    /// uniqueness).
    pub async fn subscribe_to_newsletter(&self, email: &str, name: Option<&str>) -> bool {
        if !is_valid_email(email) {
            warn!("Rejected malformed newsletter email");
            return false;
        }

        let body = NewSubscriber {
            email: email.to_string(),
            name: name.map(str::to_string),
        };
        match self
            .insert_minimal("newsletter_subscribers", &body, "subscribe to newsletter")
            .await
        {
            Ok(()) => true,
            Err(err) => {
                error!(error = %err, "Error subscribing to newsletter");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("reader@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.co"));
        assert!(is_valid_email("x@y.io"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("user@domain."));
        assert!(!is_valid_email("user@.tld"));
        assert!(!is_valid_email("spaced user@example.com"));
        assert!(!is_valid_email("user@exa mple.com"));
        assert!(!is_valid_email("two@@example.com"));
    }
}
