//! Search across users and posts.

use crate::error::ApiResult;
use crate::models::SearchResults;
use crate::traits::{HttpClient, SecureStore};

use super::client::{own_posts, ApiClient};

impl<H: HttpClient, S: SecureStore> ApiClient<H, S> {
    /// `GET /api/search?q=`. A blank query returns nothing without a request.
    pub async fn search(&self, query: &str) -> ApiResult<SearchResults> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchResults::default());
        }
        let (session, auth) = self.bearer().await?;
        let path = format!("/api/search?q={}", urlencoding::encode(query));
        let mut results: SearchResults = self.get_json(&path, &auth).await?;
        own_posts(&session, &mut results.posts);
        Ok(results)
    }
}
