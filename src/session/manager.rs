//! Session lifecycle.
//!
//! ```text
//! Unauthenticated ──sign in──▶ Authenticating ──▶ Authenticated
//!        ▲                          │                  │
//!        │                          ▼                  │
//!        │               AwaitingMusicConnection ──────┤ (music linked)
//!        │                                             │
//!        └──────────── sign out / HTTP 401 ◀───────────┘
//! ```
//!
//! Observers (the navigation layer) subscribe to a watch channel and route
//! to the sign-in screen whenever the state drops to `Unauthenticated`.

use tokio::sync::watch;

use crate::error::{ApiError, ApiResult};
use crate::models::User;
use crate::traits::SecureStore;

use super::store::{Session, SessionStore};

/// Where the app stands with respect to authentication.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticating,
    /// Signed in, but no music-streaming account linked yet.
    AwaitingMusicConnection(Session),
    Authenticated(Session),
}

impl SessionState {
    /// The session, in either signed-in state.
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::AwaitingMusicConnection(s) | SessionState::Authenticated(s) => Some(s),
            _ => None,
        }
    }

    /// True only in the fully authenticated state.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    fn label(&self) -> &'static str {
        match self {
            SessionState::Unauthenticated => "unauthenticated",
            SessionState::Authenticating => "authenticating",
            SessionState::AwaitingMusicConnection(_) => "awaiting-music-connection",
            SessionState::Authenticated(_) => "authenticated",
        }
    }
}

/// Owns the session store and broadcasts state transitions.
#[derive(Debug)]
pub struct SessionManager<S> {
    store: SessionStore<S>,
    state: watch::Sender<SessionState>,
}

impl<S: SecureStore> SessionManager<S> {
    pub fn new(store: S) -> Self {
        let (state, _) = watch::channel(SessionState::Unauthenticated);
        Self {
            store: SessionStore::new(store),
            state,
        }
    }

    /// Typed access to the credential keys.
    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receive every future transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Session required by authenticated calls.
    pub async fn require_session(&self) -> ApiResult<Session> {
        self.store.require_session().await
    }

    /// Mark a sign-in or restore as in progress.
    pub fn begin_authenticating(&self) {
        self.transition(SessionState::Authenticating);
    }

    /// Persist a token and user and move to the matching signed-in state.
    ///
    /// A user without a linked music account lands in
    /// [`SessionState::AwaitingMusicConnection`].
    pub async fn establish(
        &self,
        token: &str,
        user: &User,
        provider: Option<&str>,
    ) -> ApiResult<SessionState> {
        if let Err(e) = self.store.save(token, user, provider).await {
            tracing::error!("Failed to persist session: {}", e);
            self.discard().await;
            return Err(e);
        }

        let session = Session {
            token: token.to_string(),
            user_id: user.id,
            username: user.username.clone(),
        };
        let next = if user.apple_music_connected {
            SessionState::Authenticated(session)
        } else {
            SessionState::AwaitingMusicConnection(session)
        };
        self.transition(next.clone());
        Ok(next)
    }

    /// Finish the music-linking step.
    pub async fn complete_music_connection(&self) -> ApiResult<()> {
        let current = self.state();
        match current {
            SessionState::AwaitingMusicConnection(session) => {
                self.store.set_music_connected(true).await?;
                self.transition(SessionState::Authenticated(session));
                Ok(())
            }
            SessionState::Authenticated(_) => Ok(()),
            SessionState::Unauthenticated | SessionState::Authenticating => {
                Err(ApiError::AuthenticationMissing)
            }
        }
    }

    /// Delete all session keys and drop to `Unauthenticated`.
    ///
    /// Never fails: a store error is logged and the transition still happens.
    pub async fn sign_out(&self) {
        tracing::info!("Signing out");
        self.discard().await;
    }

    /// Handle a rejected token (HTTP 401) anywhere in the app.
    pub async fn invalidate(&self) {
        tracing::warn!("Token rejected by backend, clearing session");
        self.discard().await;
    }

    /// Delete all session keys and drop to `Unauthenticated` without logging
    /// a reason.
    pub(crate) async fn discard(&self) {
        if let Err(e) = self.store.clear().await {
            tracing::error!("Failed to clear session keys: {}", e);
        }
        self.transition(SessionState::Unauthenticated);
    }

    fn transition(&self, next: SessionState) {
        let previous = self.state.send_replace(next);
        let current = self.state.borrow();
        if previous.label() != current.label() {
            tracing::info!("Session: {} -> {}", previous.label(), current.label());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::InMemoryStore;
    use crate::session::StoreKey;

    fn user(music: bool) -> User {
        User {
            id: 7,
            username: "ana".to_string(),
            name: None,
            email_address: Some("ana@example.com".to_string()),
            auth_provider: None,
            apple_music_connected: music,
            bio: None,
            avatar_url: None,
            follower_count: 0,
            following_count: 0,
        }
    }

    #[tokio::test]
    async fn test_establish_with_music_is_authenticated() {
        let manager = SessionManager::new(InMemoryStore::new());
        let state = manager.establish("tok", &user(true), Some("apple")).await.unwrap();
        assert!(state.is_authenticated());
        assert_eq!(manager.state(), state);
    }

    #[tokio::test]
    async fn test_establish_without_music_awaits_connection() {
        let manager = SessionManager::new(InMemoryStore::new());
        let state = manager.establish("tok", &user(false), None).await.unwrap();
        assert!(matches!(state, SessionState::AwaitingMusicConnection(_)));

        manager.complete_music_connection().await.unwrap();
        assert!(manager.state().is_authenticated());
        assert!(manager.store().profile().await.unwrap().apple_music_connected);
    }

    #[tokio::test]
    async fn test_complete_music_connection_requires_session() {
        let manager = SessionManager::new(InMemoryStore::new());
        let err = manager.complete_music_connection().await.unwrap_err();
        assert!(matches!(err, ApiError::AuthenticationMissing));
    }

    #[tokio::test]
    async fn test_sign_out_clears_everything_and_notifies() {
        let store = InMemoryStore::new();
        let manager = SessionManager::new(store.clone());
        manager.establish("tok", &user(true), Some("google")).await.unwrap();
        let mut rx = manager.subscribe();

        manager.sign_out().await;

        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), SessionState::Unauthenticated);
        for key in StoreKey::ALL {
            assert!(store.value(key).is_none(), "{} still present", key);
        }
        assert!(matches!(
            manager.require_session().await,
            Err(ApiError::AuthenticationMissing)
        ));
    }

    #[tokio::test]
    async fn test_sign_out_is_unconditional_when_store_fails() {
        let store = InMemoryStore::new();
        let manager = SessionManager::new(store.clone());
        manager.establish("tok", &user(true), None).await.unwrap();
        store.set_delete_should_fail(true);

        manager.sign_out().await;

        assert_eq!(manager.state(), SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_establish_failure_leaves_unauthenticated() {
        let store = InMemoryStore::new();
        store.set_write_should_fail(true);
        let manager = SessionManager::new(store);
        manager.begin_authenticating();

        let result = manager.establish("tok", &user(true), None).await;

        assert!(matches!(result, Err(ApiError::Store(_))));
        assert_eq!(manager.state(), SessionState::Unauthenticated);
    }
}
