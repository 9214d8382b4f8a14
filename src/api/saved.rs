//! Saved posts.

use crate::error::ApiResult;
use crate::models::requests::SavedPostBody;
use crate::models::{Page, PageRequest, Post};
use crate::traits::{HttpClient, SecureStore};

use super::client::{ApiClient, Method};

impl<H: HttpClient, S: SecureStore> ApiClient<H, S> {
    pub async fn save_post(&self, post_id: i64) -> ApiResult<()> {
        self.saved_mutation(Method::Post, post_id).await
    }

    pub async fn unsave_post(&self, post_id: i64) -> ApiResult<()> {
        self.saved_mutation(Method::Delete, post_id).await
    }

    async fn saved_mutation(&self, method: Method, post_id: i64) -> ApiResult<()> {
        let (session, auth) = self.bearer().await?;
        let body = SavedPostBody {
            post_id,
            user_id: session.user_id,
        };
        self.send_json::<_, serde_json::Value>(method, "/api/saved-posts", &body, &auth)
            .await?;
        Ok(())
    }

    /// `GET /api/saved-posts/user/{id}/paginated`. Every returned post is
    /// marked saved.
    pub async fn saved_page(&self, user_id: i64, request: &PageRequest) -> ApiResult<Page<Post>> {
        let path = format!(
            "/api/saved-posts/user/{}/paginated{}",
            user_id,
            request.to_query()
        );
        let mut page = self.fetch_posts_page(&path).await?;
        for post in &mut page.data {
            post.is_saved = true;
        }
        Ok(page)
    }
}
