//! In-memory session credentials.

use tokio::sync::RwLock;

use super::tokens::{AccessToken, RefreshToken};

/// The access and refresh credentials held by one client.
///
/// Both start empty. Only the credential lifecycle operations replace them,
/// and they always replace both under one write lock, so readers never see
/// an access token paired with a stale refresh token.
#[derive(Default)]
pub struct SessionState {
    tokens: RwLock<SessionTokens>,
}

#[derive(Default)]
struct SessionTokens {
    access_token: Option<AccessToken>,
    refresh_token: Option<RefreshToken>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current access token.
    pub async fn access_token(&self) -> Option<AccessToken> {
        self.tokens.read().await.access_token.clone()
    }

    /// Snapshot of the current refresh token.
    pub async fn refresh_token(&self) -> Option<RefreshToken> {
        self.tokens.read().await.refresh_token.clone()
    }

    /// True when a non-empty access token is held.
    pub async fn is_authenticated(&self) -> bool {
        self.tokens
            .read()
            .await
            .access_token
            .as_ref()
            .is_some_and(|t| !t.as_str().is_empty())
    }

    pub(crate) async fn replace(&self, access_token: AccessToken, refresh_token: RefreshToken) {
        let mut tokens = self.tokens.write().await;
        tokens.access_token = Some(access_token);
        tokens.refresh_token = Some(refresh_token);
    }

    pub(crate) async fn clear(&self) {
        let mut tokens = self.tokens.write().await;
        tokens.access_token = None;
        tokens.refresh_token = None;
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
