//! Sign-in, launch-time restore, sign-out and the health check.

use chrono::Utc;

use crate::error::{ApiError, ApiResult};
use crate::models::requests::StoreUserTokenBody;
use crate::models::{AuthResponse, SignInRequest};
use crate::session::{is_expired_at, SessionState};
use crate::traits::{HttpClient, SecureStore};

use super::client::{decode, ApiClient, Auth, Method};

impl<H: HttpClient, S: SecureStore> ApiClient<H, S> {
    /// Sign in with a platform identity token.
    ///
    /// Lands in `Authenticated` when the backend reports a linked music
    /// account, otherwise in `AwaitingMusicConnection`. Any failure leaves
    /// the session `Unauthenticated`.
    pub async fn sign_in(&self, request: &SignInRequest) -> ApiResult<SessionState> {
        self.session().begin_authenticating();
        match self.sign_in_inner(request).await {
            Ok(state) => Ok(state),
            Err(e) => {
                tracing::warn!("Sign-in via {} failed: {}", request.provider(), e);
                self.session().discard().await;
                Err(e)
            }
        }
    }

    async fn sign_in_inner(&self, request: &SignInRequest) -> ApiResult<SessionState> {
        let body = request.body()?;
        let response = self
            .send(
                Method::Post,
                request.path(),
                Some(body),
                &Auth::Anonymous,
                self.config().auth_timeout,
            )
            .await?;
        let auth: AuthResponse = decode(&response)?;
        if auth.token.trim().is_empty() {
            return Err(ApiError::Decode {
                message: "sign-in response has no token".to_string(),
            });
        }
        tracing::info!("Signed in as {} via {}", auth.user.username, request.provider());
        self.session()
            .establish(&auth.token, &auth.user, Some(request.provider()))
            .await
    }

    /// Restore the session at launch.
    ///
    /// With a stored token, ask the backend who we are; success re-establishes
    /// the session and refreshes the cached profile. A missing or expired
    /// token, or any failure of the who-am-I call, deletes every session key.
    pub async fn restore(&self) -> SessionState {
        let token = match self.session().store().token().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                tracing::debug!("No stored token");
                self.session().discard().await;
                return SessionState::Unauthenticated;
            }
            Err(e) => {
                tracing::error!("Failed to read stored token: {}", e);
                self.session().discard().await;
                return SessionState::Unauthenticated;
            }
        };

        if is_expired_at(&token, Utc::now()) {
            tracing::info!("Stored token has expired");
            self.session().invalidate().await;
            return SessionState::Unauthenticated;
        }

        self.session().begin_authenticating();
        let user = match self.me().await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Session restore failed: {}", e);
                self.session().discard().await;
                return SessionState::Unauthenticated;
            }
        };

        match self.session().establish(&token, &user, None).await {
            Ok(state) => state,
            Err(_) => SessionState::Unauthenticated,
        }
    }

    /// Delete every session key. Never needs the network.
    pub async fn sign_out(&self) {
        self.session().sign_out().await;
    }

    /// Finish linking a music-streaming account.
    ///
    /// When the platform SDK produced a user token it is sent to the backend
    /// first; the session only moves on if that succeeds.
    pub async fn complete_music_connection(&self, music_user_token: Option<&str>) -> ApiResult<()> {
        if let Some(token) = music_user_token {
            self.store_music_user_token(token).await?;
        }
        self.session().complete_music_connection().await
    }

    /// `POST /api/apple-music/store-user-token`.
    pub async fn store_music_user_token(&self, music_user_token: &str) -> ApiResult<()> {
        let (_, auth) = self.bearer().await?;
        let body = StoreUserTokenBody { music_user_token };
        self.send_json::<_, serde_json::Value>(
            Method::Post,
            "/api/apple-music/store-user-token",
            &body,
            &auth,
        )
        .await?;
        Ok(())
    }

    /// Whether the backend answers at all. Unauthenticated.
    pub async fn health(&self) -> bool {
        match self
            .send(
                Method::Get,
                "/api/health",
                None,
                &Auth::Anonymous,
                self.config().timeout,
            )
            .await
        {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("Health check failed: {}", e);
                false
            }
        }
    }
}
