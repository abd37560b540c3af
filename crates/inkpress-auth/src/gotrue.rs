//! GoTrue REST client for the hosted auth service.

use crate::error::{AuthError, AuthResult};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn summarize_response_body(body: &str) -> String {
    let mut hasher = DefaultHasher::new();
    body.hash(&mut hasher);
    format!("len={},digest={:016x}", body.len(), hasher.finish())
}

/// Authenticated user identity as reported by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// User UUID
    pub id: String,
    /// Email the account was registered with
    pub email: Option<String>,
}

/// Token bundle returned by the password and refresh grants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Lifetime of the access token in seconds.
    pub expires_in: i64,
    /// Absolute expiry as a unix timestamp (not sent by every server
    /// version; derived from `expires_in` when absent).
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

#[derive(Serialize)]
struct PasswordGrantRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrantRequest<'a> {
    refresh_token: &'a str,
}

/// GoTrue REST client.
#[derive(Clone)]
pub struct GoTrueClient {
    http_client: reqwest::Client,
    api_url: String,
    anon_key: String,
}

impl GoTrueClient {
    /// Create a new GoTrue client.
    ///
    /// # Arguments
    /// * `api_url` - The project API URL (e.g., `https://xyz.supabase.co`)
    /// * `anon_key` - The anonymous API key
    pub fn new(api_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_url: api_url.into(),
            anon_key: anon_key.into(),
        }
    }

    /// Build the auth API URL for an endpoint.
    fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/auth/v1/{}", self.api_url, endpoint)
    }

    /// Sign in with email and password.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> AuthResult<TokenResponse> {
        let url = self.auth_url("token?grant_type=password");

        tracing::debug!("Requesting password grant");

        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.anon_key)
            .header("Content-Type", "application/json")
            .json(&PasswordGrantRequest { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let body_summary = summarize_response_body(&body);
            tracing::warn!(status = %status, body_summary = %body_summary, "Password grant rejected");
            return Err(AuthError::Rejected(format!(
                "Sign-in failed: {} ({})",
                status, body_summary
            )));
        }

        let tokens: TokenResponse = response.json().await?;
        tracing::info!(user_id = %tokens.user.id, "Signed in");
        Ok(tokens)
    }

    /// Exchange a refresh token for a fresh token bundle.
    pub async fn refresh_session(&self, refresh_token: &str) -> AuthResult<TokenResponse> {
        let url = self.auth_url("token?grant_type=refresh_token");

        tracing::debug!("Refreshing session");

        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.anon_key)
            .header("Content-Type", "application/json")
            .json(&RefreshGrantRequest { refresh_token })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let body_summary = summarize_response_body(&body);
            tracing::warn!(status = %status, body_summary = %body_summary, "Refresh grant rejected");
            return Err(AuthError::Rejected(format!(
                "Session refresh failed: {} ({})",
                status, body_summary
            )));
        }

        let tokens: TokenResponse = response.json().await?;
        Ok(tokens)
    }

    /// Fetch the user identity behind an access token.
    pub async fn fetch_user(&self, access_token: &str) -> AuthResult<AuthUser> {
        let url = self.auth_url("user");

        let response = self
            .http_client
            .get(&url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", access_token))
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let body_summary = summarize_response_body(&body);
            tracing::warn!(status = %status, body_summary = %body_summary, "User fetch rejected");
            return Err(AuthError::Rejected(format!(
                "User fetch failed: {} ({})",
                status, body_summary
            )));
        }

        let user: AuthUser = response.json().await?;
        Ok(user)
    }

    /// Revoke the session behind an access token.
    pub async fn sign_out(&self, access_token: &str) -> AuthResult<()> {
        let url = self.auth_url("logout");

        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let body_summary = summarize_response_body(&body);
            tracing::warn!(status = %status, body_summary = %body_summary, "Logout rejected");
            // Local teardown proceeds regardless; the caller only needs to
            // know the remote revocation did not happen.
            return Err(AuthError::Rejected(format!(
                "Logout failed: {} ({})",
                status, body_summary
            )));
        }

        tracing::info!("Session revoked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GoTrueClient::new("https://test.supabase.co", "test-key");
        assert_eq!(client.api_url, "https://test.supabase.co");
        assert_eq!(client.anon_key, "test-key");
    }

    #[test]
    fn test_auth_url() {
        let client = GoTrueClient::new("https://test.supabase.co", "test-key");
        assert_eq!(
            client.auth_url("token?grant_type=password"),
            "https://test.supabase.co/auth/v1/token?grant_type=password"
        );
        assert_eq!(
            client.auth_url("logout"),
            "https://test.supabase.co/auth/v1/logout"
        );
    }

    #[test]
    fn test_token_response_deserialization() {
        let json = r#"{
            "access_token": "jwt",
            "refresh_token": "refresh",
            "expires_in": 3600,
            "user": { "id": "user-1", "email": "ada@example.com" }
        }"#;

        let tokens: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(tokens.access_token, "jwt");
        assert_eq!(tokens.expires_in, 3600);
        assert!(tokens.expires_at.is_none());
        assert_eq!(tokens.user.id, "user-1");
    }

    #[test]
    fn test_body_summary_hides_content() {
        let summary = summarize_response_body("{\"error\":\"invalid_grant\"}");
        assert!(summary.starts_with("len=25,digest="));
        assert!(!summary.contains("invalid_grant"));
    }
}
