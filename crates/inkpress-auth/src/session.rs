//! Session management with disk persistence and expiry-based refresh.

use crate::error::{AuthError, AuthResult};
use crate::gotrue::{AuthUser, GoTrueClient, TokenResponse};
use chrono::Utc;
use inkpress_api::ApiClient;
use inkpress_core::{Config, Paths};
use inkpress_types::Profile;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Refresh the access token when it expires within this many seconds.
pub const REFRESH_SLACK_SECS: i64 = 60;

/// An authenticated session: the token bundle plus the user it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    /// Absolute access-token expiry as a unix timestamp.
    pub expires_at: i64,
    pub user: AuthUser,
}

impl AuthSession {
    /// Build a session from a grant response, deriving the absolute expiry
    /// when the server only sent a relative one.
    pub fn from_tokens(tokens: TokenResponse) -> Self {
        let expires_at = tokens
            .expires_at
            .unwrap_or_else(|| Utc::now().timestamp() + tokens.expires_in);
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_at,
            user: tokens.user,
        }
    }

    /// Whether the access token expires within `slack_secs` from now.
    pub fn expires_within(&self, slack_secs: i64) -> bool {
        Utc::now().timestamp() + slack_secs >= self.expires_at
    }
}

/// Read-only snapshot of the session state.
#[derive(Debug, Clone, Serialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub expires_at: Option<i64>,
}

impl AuthStatus {
    fn signed_out() -> Self {
        Self {
            authenticated: false,
            user_id: None,
            email: None,
            expires_at: None,
        }
    }

    fn from_session(session: &AuthSession) -> Self {
        Self {
            authenticated: true,
            user_id: Some(session.user.id.clone()),
            email: session.user.email.clone(),
            expires_at: Some(session.expires_at),
        }
    }
}

#[derive(Default)]
struct SessionState {
    session: Option<AuthSession>,
    profile: Option<Profile>,
}

/// Owns the current session and derived profile.
///
/// Constructed once by the application and passed to consumers; there is no
/// process-global instance. Consumers treat it as read-mostly; only the auth
/// flow mutates it. Lifecycle: [`initialize`](Self::initialize) on startup,
/// [`sign_in`](Self::sign_in) / [`sign_out`](Self::sign_out) on user action.
pub struct SessionManager {
    gotrue: GoTrueClient,
    api: ApiClient,
    paths: Paths,
    state: RwLock<SessionState>,
}

impl SessionManager {
    /// Create a session manager from the client configuration.
    pub fn new(config: &Config, paths: Paths) -> Self {
        Self {
            gotrue: GoTrueClient::new(
                config.supabase_url.clone(),
                config.supabase_publishable_key.clone(),
            ),
            api: ApiClient::new(
                config.supabase_url.clone(),
                config.supabase_publishable_key.clone(),
            ),
            paths,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Restore a persisted session, refreshing it when expired, and load the
    /// profile behind it. Returns the resulting status; a missing or dead
    /// persisted session leaves the manager signed out without error.
    pub async fn initialize(&self) -> AuthResult<AuthStatus> {
        let Some(persisted) = read_persisted(&self.paths.session_file()) else {
            debug!("No persisted session");
            return Ok(AuthStatus::signed_out());
        };

        let session = if persisted.expires_within(REFRESH_SLACK_SECS) {
            match self.gotrue.refresh_session(&persisted.refresh_token).await {
                Ok(tokens) => AuthSession::from_tokens(tokens),
                Err(err) => {
                    warn!(error = %err, "Persisted session could not be refreshed");
                    let _ = std::fs::remove_file(self.paths.session_file());
                    return Ok(AuthStatus::signed_out());
                }
            }
        } else {
            persisted
        };

        self.install_session(session).await
    }

    /// Sign in with email and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthStatus> {
        let tokens = self.gotrue.sign_in_with_password(email, password).await?;
        self.install_session(AuthSession::from_tokens(tokens)).await
    }

    /// Sign out: revoke the remote session (best-effort) and tear down local
    /// state unconditionally.
    pub async fn sign_out(&self) -> AuthResult<()> {
        let session = {
            let mut state = self.state.write().await;
            let session = state.session.take();
            state.profile = None;
            session
        };

        if self.paths.session_file().exists() {
            std::fs::remove_file(self.paths.session_file())?;
        }

        if let Some(session) = session {
            if let Err(err) = self.gotrue.sign_out(&session.access_token).await {
                warn!(error = %err, "Remote sign-out failed; local session cleared");
            }
            info!(user_id = %session.user.id, "Signed out");
        }

        Ok(())
    }

    /// The current authenticated user, if any.
    pub async fn current_user(&self) -> Option<AuthUser> {
        self.state.read().await.session.as_ref().map(|s| s.user.clone())
    }

    /// The profile behind the current session, if loaded.
    pub async fn current_profile(&self) -> Option<Profile> {
        self.state.read().await.profile.clone()
    }

    /// Re-fetch the profile behind the current session (e.g. after a
    /// profile update).
    pub async fn reload_profile(&self) -> Option<Profile> {
        let client = self.api_client().await;
        let user_id = self.state.read().await.session.as_ref()?.user.id.clone();
        let profile = client.get_profile(&user_id).await;
        self.state.write().await.profile = profile.clone();
        profile
    }

    /// A valid access token, refreshing first when the current one expires
    /// within [`REFRESH_SLACK_SECS`].
    pub async fn access_token(&self) -> AuthResult<String> {
        let (needs_refresh, token, refresh_token) = {
            let state = self.state.read().await;
            let Some(session) = state.session.as_ref() else {
                return Err(AuthError::NotAuthenticated);
            };
            (
                session.expires_within(REFRESH_SLACK_SECS),
                session.access_token.clone(),
                session.refresh_token.clone(),
            )
        };

        if !needs_refresh {
            return Ok(token);
        }

        let tokens = self.gotrue.refresh_session(&refresh_token).await?;
        let session = AuthSession::from_tokens(tokens);
        let token = session.access_token.clone();
        write_persisted(&self.paths, &session)?;
        self.state.write().await.session = Some(session);
        Ok(token)
    }

    /// A data-access client carrying the current access token, or the
    /// anonymous client when signed out (or when refresh fails).
    pub async fn api_client(&self) -> ApiClient {
        match self.access_token().await {
            Ok(token) => self.api.with_access_token(token),
            Err(_) => self.api.clone(),
        }
    }

    /// Read-only snapshot of the session state.
    pub async fn status(&self) -> AuthStatus {
        match self.state.read().await.session.as_ref() {
            Some(session) => AuthStatus::from_session(session),
            None => AuthStatus::signed_out(),
        }
    }

    async fn install_session(&self, session: AuthSession) -> AuthResult<AuthStatus> {
        write_persisted(&self.paths, &session)?;

        let profile = self
            .api
            .with_access_token(session.access_token.clone())
            .get_profile(&session.user.id)
            .await;
        if profile.is_none() {
            warn!(user_id = %session.user.id, "No profile loaded for session");
        }

        let status = AuthStatus::from_session(&session);
        let mut state = self.state.write().await;
        state.session = Some(session);
        state.profile = profile;
        Ok(status)
    }
}

fn read_persisted(path: &Path) -> Option<AuthSession> {
    if !path.exists() {
        return None;
    }
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            warn!(error = %err, "Failed to read persisted session");
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(session) => Some(session),
        Err(err) => {
            warn!(error = %err, "Persisted session is corrupt; discarding");
            let _ = std::fs::remove_file(path);
            None
        }
    }
}

fn write_persisted(paths: &Paths, session: &AuthSession) -> AuthResult<()> {
    paths.ensure_dirs().map_err(|err| {
        AuthError::Storage(std::io::Error::other(err.to_string()))
    })?;
    let content = serde_json::to_string_pretty(session)?;
    std::fs::write(paths.session_file(), content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_session(expires_at: i64) -> AuthSession {
        AuthSession {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at,
            user: AuthUser {
                id: "user-1".to_string(),
                email: Some("ada@example.com".to_string()),
            },
        }
    }

    #[test]
    fn test_session_from_tokens_derives_expiry() {
        let tokens = TokenResponse {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            expires_in: 3600,
            expires_at: None,
            user: AuthUser {
                id: "user-1".to_string(),
                email: None,
            },
        };

        let before = Utc::now().timestamp();
        let session = AuthSession::from_tokens(tokens);
        assert!(session.expires_at >= before + 3600);
        assert!(session.expires_at <= Utc::now().timestamp() + 3600);
    }

    #[test]
    fn test_session_from_tokens_prefers_absolute_expiry() {
        let tokens = TokenResponse {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            expires_in: 3600,
            expires_at: Some(1_234_567),
            user: AuthUser {
                id: "user-1".to_string(),
                email: None,
            },
        };

        assert_eq!(AuthSession::from_tokens(tokens).expires_at, 1_234_567);
    }

    #[test]
    fn test_expires_within() {
        let soon = sample_session(Utc::now().timestamp() + 30);
        assert!(soon.expires_within(REFRESH_SLACK_SECS));

        let later = sample_session(Utc::now().timestamp() + 3600);
        assert!(!later.expires_within(REFRESH_SLACK_SECS));
    }

    #[test]
    fn test_persist_roundtrip() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());
        let session = sample_session(1_234_567);

        write_persisted(&paths, &session).unwrap();
        let restored = read_persisted(&paths.session_file()).unwrap();

        assert_eq!(restored.access_token, "access");
        assert_eq!(restored.expires_at, 1_234_567);
        assert_eq!(restored.user.id, "user-1");
    }

    #[test]
    fn test_read_persisted_missing_file() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());
        assert!(read_persisted(&paths.session_file()).is_none());
    }

    #[test]
    fn test_read_persisted_corrupt_file_is_discarded() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());
        paths.ensure_dirs().unwrap();
        std::fs::write(paths.session_file(), "not json").unwrap();

        assert!(read_persisted(&paths.session_file()).is_none());
        assert!(!paths.session_file().exists());
    }

    #[tokio::test]
    async fn test_manager_starts_signed_out() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());
        let manager = SessionManager::new(&Config::default(), paths);

        let status = manager.status().await;
        assert!(!status.authenticated);
        assert!(manager.current_user().await.is_none());
        assert!(manager.current_profile().await.is_none());
        assert!(matches!(
            manager.access_token().await,
            Err(AuthError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_initialize_without_persisted_session() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());
        let manager = SessionManager::new(&Config::default(), paths);

        let status = manager.initialize().await.unwrap();
        assert!(!status.authenticated);
    }

    #[tokio::test]
    async fn test_sign_out_clears_persisted_session() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());
        write_persisted(&paths, &sample_session(1_234_567)).unwrap();

        let manager = SessionManager::new(&Config::default(), paths.clone());
        manager.sign_out().await.unwrap();

        assert!(!paths.session_file().exists());
        assert!(!manager.status().await.authenticated);
    }
}
