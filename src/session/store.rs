//! The session capability over the secure store.

use crate::error::{ApiError, ApiResult};
use crate::models::User;
use crate::traits::SecureStore;

use super::keys::StoreKey;

/// The authenticated identity used on every authenticated call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub username: String,
}

/// Denormalized profile fields cached next to the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub name: Option<String>,
    pub email_address: Option<String>,
    pub auth_provider: Option<String>,
    pub apple_music_connected: bool,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub follower_count: i64,
    pub following_count: i64,
}

/// Typed access to the credential keys.
///
/// Every read and write of session data goes through here.
#[derive(Debug)]
pub struct SessionStore<S> {
    store: S,
}

impl<S: SecureStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn inner(&self) -> &S {
        &self.store
    }

    /// The stored bearer token, if any.
    pub async fn token(&self) -> ApiResult<Option<String>> {
        Ok(self
            .store
            .get(StoreKey::JwtToken)
            .await?
            .filter(|t| !t.trim().is_empty()))
    }

    /// The stored session, or `None` when token or user id is missing.
    pub async fn load_session(&self) -> ApiResult<Option<Session>> {
        let Some(token) = self.token().await? else {
            return Ok(None);
        };
        let Some(raw_id) = self.store.get(StoreKey::UserId).await? else {
            return Ok(None);
        };
        let user_id = match raw_id.trim().parse::<i64>() {
            Ok(id) => id,
            Err(_) => {
                tracing::warn!("Stored userId is not numeric: {:?}", raw_id);
                return Ok(None);
            }
        };
        let username = self
            .store
            .get(StoreKey::Username)
            .await?
            .unwrap_or_default();

        Ok(Some(Session {
            token,
            user_id,
            username,
        }))
    }

    /// The stored session, or [`ApiError::AuthenticationMissing`].
    pub async fn require_session(&self) -> ApiResult<Session> {
        self.load_session()
            .await?
            .ok_or(ApiError::AuthenticationMissing)
    }

    /// Persist a freshly issued token together with the user it belongs to.
    pub async fn save(&self, token: &str, user: &User, provider: Option<&str>) -> ApiResult<()> {
        self.store.set(StoreKey::JwtToken, token).await?;
        self.store
            .set(StoreKey::UserId, &user.id.to_string())
            .await?;
        self.store.set(StoreKey::Username, &user.username).await?;
        if let Some(provider) = provider {
            self.store.set(StoreKey::AuthProvider, provider).await?;
        }
        self.save_profile(user).await
    }

    /// Refresh the denormalized profile fields from a user record.
    pub async fn save_profile(&self, user: &User) -> ApiResult<()> {
        self.set_optional(StoreKey::Name, user.name.as_deref()).await?;
        self.set_optional(StoreKey::EmailAddress, user.email_address.as_deref())
            .await?;
        if let Some(provider) = user.auth_provider.as_deref() {
            self.store.set(StoreKey::AuthProvider, provider).await?;
        }
        self.set_optional(StoreKey::Bio, user.bio.as_deref()).await?;
        self.set_optional(StoreKey::AvatarUrl, user.avatar_url.as_deref())
            .await?;
        self.store
            .set(StoreKey::FollowerCount, &user.follower_count.to_string())
            .await?;
        self.store
            .set(StoreKey::FollowingCount, &user.following_count.to_string())
            .await?;
        self.set_music_connected(user.apple_music_connected).await
    }

    /// Record whether a music-streaming account is linked.
    pub async fn set_music_connected(&self, connected: bool) -> ApiResult<()> {
        self.store
            .set(
                StoreKey::AppleMusicConnected,
                if connected { "true" } else { "false" },
            )
            .await?;
        Ok(())
    }

    /// Read the cached profile fields.
    pub async fn profile(&self) -> ApiResult<Profile> {
        let count = |raw: Option<String>| raw.and_then(|v| v.parse::<i64>().ok()).unwrap_or(0);
        Ok(Profile {
            name: self.store.get(StoreKey::Name).await?,
            email_address: self.store.get(StoreKey::EmailAddress).await?,
            auth_provider: self.store.get(StoreKey::AuthProvider).await?,
            apple_music_connected: self
                .store
                .get(StoreKey::AppleMusicConnected)
                .await?
                .is_some_and(|v| v == "true"),
            bio: self.store.get(StoreKey::Bio).await?,
            avatar_url: self.store.get(StoreKey::AvatarUrl).await?,
            follower_count: count(self.store.get(StoreKey::FollowerCount).await?),
            following_count: count(self.store.get(StoreKey::FollowingCount).await?),
        })
    }

    /// Delete every session key.
    pub async fn clear(&self) -> ApiResult<()> {
        self.store.delete_all().await?;
        Ok(())
    }

    async fn set_optional(&self, key: StoreKey, value: Option<&str>) -> ApiResult<()> {
        match value {
            Some(v) => self.store.set(key, v).await?,
            None => self.store.delete(key).await?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::InMemoryStore;

    fn user() -> User {
        User {
            id: 42,
            username: "mo".to_string(),
            name: Some("Mo".to_string()),
            email_address: None,
            auth_provider: None,
            apple_music_connected: true,
            bio: Some("hi".to_string()),
            avatar_url: None,
            follower_count: 3,
            following_count: 5,
        }
    }

    #[tokio::test]
    async fn test_save_and_load_session() {
        let store = SessionStore::new(InMemoryStore::new());
        store.save("tok", &user(), Some("apple")).await.unwrap();

        let session = store.load_session().await.unwrap().unwrap();
        assert_eq!(
            session,
            Session {
                token: "tok".to_string(),
                user_id: 42,
                username: "mo".to_string(),
            }
        );

        let profile = store.profile().await.unwrap();
        assert_eq!(profile.auth_provider.as_deref(), Some("apple"));
        assert!(profile.apple_music_connected);
        assert_eq!(profile.follower_count, 3);
        assert_eq!(profile.following_count, 5);
    }

    #[tokio::test]
    async fn test_require_session_without_token() {
        let store = SessionStore::new(InMemoryStore::new());
        let err = store.require_session().await.unwrap_err();
        assert!(matches!(err, ApiError::AuthenticationMissing));
    }

    #[tokio::test]
    async fn test_token_without_user_id_is_not_a_session() {
        let inner = InMemoryStore::new();
        inner.insert(StoreKey::JwtToken, "tok");
        let store = SessionStore::new(inner);
        assert!(store.load_session().await.unwrap().is_none());
        assert_eq!(store.token().await.unwrap().as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_non_numeric_user_id_is_not_a_session() {
        let inner = InMemoryStore::new();
        inner.insert(StoreKey::JwtToken, "tok");
        inner.insert(StoreKey::UserId, "abc");
        let store = SessionStore::new(inner);
        assert!(store.load_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_removes_every_key() {
        let inner = InMemoryStore::new();
        for key in StoreKey::ALL {
            inner.insert(key, "x");
        }
        let store = SessionStore::new(inner.clone());
        store.clear().await.unwrap();
        assert!(inner.is_empty());
    }
}
