//! Session Provider
//!
//! Rebuilds the signed-in identity from the persisted token pair and tells
//! subscribers whenever it changes.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::claims::{self, SessionClaims};
use crate::error::SessionResult;
use crate::store::{SESSION_KEY, SessionStore};

/// Token pair as persisted on the client
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSession {
    pub token: Option<String>,
    pub refresh_token: Option<String>,
}

impl UserSession {
    pub fn new(token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            refresh_token: Some(refresh_token.into()),
        }
    }

    fn has_tokens(&self) -> bool {
        let present = |t: &Option<String>| t.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.token) || present(&self.refresh_token)
    }
}

impl std::fmt::Debug for UserSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserSession")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationState {
    Anonymous,
    Authenticated(SessionClaims),
}

impl AuthenticationState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthenticationState::Authenticated(_))
    }

    pub fn claims(&self) -> Option<&SessionClaims> {
        match self {
            AuthenticationState::Authenticated(claims) => Some(claims),
            AuthenticationState::Anonymous => None,
        }
    }

    fn from_session(session: &UserSession) -> Self {
        let Some(token) = session.token.as_deref().filter(|t| !t.is_empty()) else {
            return AuthenticationState::Anonymous;
        };

        match claims::decode(token) {
            Ok(claims) => AuthenticationState::Authenticated(claims),
            Err(e) => {
                tracing::warn!(error = %e, "Stored access token unreadable, treating as anonymous");
                AuthenticationState::Anonymous
            }
        }
    }
}

pub struct SessionProvider<S: SessionStore> {
    store: S,
    state: watch::Sender<AuthenticationState>,
}

impl<S: SessionStore> SessionProvider<S> {
    pub fn new(store: S) -> Self {
        let (state, _) = watch::channel(AuthenticationState::Anonymous);
        Self { store, state }
    }

    /// Current identity from the persisted session. Never fails: any missing
    /// or unreadable piece yields `Anonymous`.
    pub async fn authentication_state(&self) -> AuthenticationState {
        match self.stored_session().await {
            Some(session) => AuthenticationState::from_session(&session),
            None => AuthenticationState::Anonymous,
        }
    }

    /// The persisted token pair, if one is stored and readable
    pub async fn stored_session(&self) -> Option<UserSession> {
        let blob = match self.store.get(SESSION_KEY).await {
            Ok(Some(blob)) if !blob.trim().is_empty() => blob,
            Ok(_) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Session store read failed");
                return None;
            }
        };

        match serde_json::from_str::<UserSession>(&blob) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::debug!(error = %e, "Stored session blob unreadable");
                None
            }
        }
    }

    /// Persist `session` (or clear it when it holds no tokens) and notify
    /// subscribers of the resulting state
    pub async fn update_authentication_state(
        &self,
        session: UserSession,
    ) -> SessionResult<AuthenticationState> {
        let state = if session.has_tokens() {
            let blob = serde_json::to_string(&session)?;
            self.store.set(SESSION_KEY, blob).await?;
            AuthenticationState::from_session(&session)
        } else {
            self.store.remove(SESSION_KEY).await?;
            AuthenticationState::Anonymous
        };

        tracing::debug!(authenticated = state.is_authenticated(), "Authentication state changed");
        self.state.send_replace(state.clone());

        Ok(state)
    }

    /// Forget the local session. The server-side refresh token is untouched.
    pub async fn sign_out(&self) -> SessionResult<()> {
        self.update_authentication_state(UserSession::default()).await?;
        Ok(())
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthenticationState> {
        self.state.subscribe()
    }
}
