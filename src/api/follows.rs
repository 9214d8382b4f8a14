//! The social graph.

use crate::error::{ApiError, ApiResult};
use crate::models::requests::FollowBody;
use crate::models::user::CountResponse;
use crate::models::{FollowTotals, FollowUser};
use crate::traits::{HttpClient, SecureStore};

use super::client::{ApiClient, Method};

impl<H: HttpClient, S: SecureStore> ApiClient<H, S> {
    pub async fn follow(&self, user_id: i64) -> ApiResult<()> {
        self.follow_mutation(Method::Post, user_id).await
    }

    pub async fn unfollow(&self, user_id: i64) -> ApiResult<()> {
        self.follow_mutation(Method::Delete, user_id).await
    }

    async fn follow_mutation(&self, method: Method, user_id: i64) -> ApiResult<()> {
        let (session, auth) = self.bearer().await?;
        if session.user_id == user_id {
            return Err(ApiError::validation("You can't follow yourself"));
        }
        let body = FollowBody {
            follower_id: session.user_id,
            following_id: user_id,
        };
        self.send_json::<_, serde_json::Value>(method, "/api/follows", &body, &auth)
            .await?;
        Ok(())
    }

    pub async fn followers(&self, user_id: i64) -> ApiResult<Vec<FollowUser>> {
        let (_, auth) = self.bearer().await?;
        self.get_json(&format!("/api/follows/followers/{}", user_id), &auth)
            .await
    }

    pub async fn following(&self, user_id: i64) -> ApiResult<Vec<FollowUser>> {
        let (_, auth) = self.bearer().await?;
        self.get_json(&format!("/api/follows/following/{}", user_id), &auth)
            .await
    }

    /// Follower and following counts for a profile header.
    pub async fn follow_totals(&self, user_id: i64) -> ApiResult<FollowTotals> {
        let (_, auth) = self.bearer().await?;
        let followers_path = format!("/api/follows/followers/{}/total", user_id);
        let following_path = format!("/api/follows/following/{}/total", user_id);
        let (followers, following): (CountResponse, CountResponse) = futures::try_join!(
            self.get_json(&followers_path, &auth),
            self.get_json(&following_path, &auth),
        )?;
        Ok(FollowTotals {
            followers: followers.total,
            following: following.total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryStore, MockHttpClient, MockResponse};
    use crate::config::ClientConfig;
    use crate::session::{SessionManager, StoreKey};
    use serde_json::json;

    fn client() -> (ApiClient<MockHttpClient, InMemoryStore>, MockHttpClient) {
        let store = InMemoryStore::new();
        store.insert(StoreKey::JwtToken, "tok");
        store.insert(StoreKey::UserId, "1");
        let http = MockHttpClient::new();
        let api = ApiClient::new(
            ClientConfig::new().with_base_url("https://api.test"),
            http.clone(),
            SessionManager::new(store),
        );
        (api, http)
    }

    #[tokio::test]
    async fn test_follow_body() {
        let (api, http) = client();
        http.set_default_response(MockResponse::status(201));
        api.follow(6).await.unwrap();
        assert_eq!(
            http.get_requests()[0].json().unwrap(),
            json!({"followerId": 1, "followingId": 6})
        );
    }

    #[tokio::test]
    async fn test_follow_self_rejected_locally() {
        let (api, http) = client();
        assert!(matches!(api.follow(1).await, Err(ApiError::Validation { .. })));
        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_follow_totals() {
        let (api, http) = client();
        http.set_route(
            "GET",
            "https://api.test/api/follows/followers/6/total",
            MockResponse::json(200, json!({"total": 10})),
        );
        http.set_route(
            "GET",
            "https://api.test/api/follows/following/6/total",
            MockResponse::json(200, json!({"count": 2})),
        );
        assert_eq!(
            api.follow_totals(6).await.unwrap(),
            FollowTotals {
                followers: 10,
                following: 2
            }
        );
    }
}
