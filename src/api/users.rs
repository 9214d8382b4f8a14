//! Identity lookups.

use crate::error::ApiResult;
use crate::models::user::{UserIdResponse, UsernameResponse};
use crate::models::User;
use crate::traits::{HttpClient, SecureStore};

use super::client::ApiClient;

impl<H: HttpClient, S: SecureStore> ApiClient<H, S> {
    /// `GET /api/users/me`: the who-am-I call. Needs only the token.
    pub async fn me(&self) -> ApiResult<User> {
        let auth = self.token_only().await?;
        self.get_json("/api/users/me", &auth).await
    }

    /// Fetch the current user and refresh the cached profile fields.
    pub async fn refresh_profile(&self) -> ApiResult<User> {
        let user = self.me().await?;
        self.session().store().save_profile(&user).await?;
        Ok(user)
    }

    pub async fn user_id_by_username(&self, username: &str) -> ApiResult<i64> {
        let (_, auth) = self.bearer().await?;
        let path = format!("/api/users/username/{}/id", urlencoding::encode(username));
        let resp: UserIdResponse = self.get_json(&path, &auth).await?;
        Ok(resp.user_id)
    }

    pub async fn username_by_id(&self, user_id: i64) -> ApiResult<String> {
        let (_, auth) = self.bearer().await?;
        let resp: UsernameResponse = self
            .get_json(&format!("/api/users/{}/username", user_id), &auth)
            .await?;
        Ok(resp.username)
    }
}
