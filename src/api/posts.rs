//! Playlist posts: paginated lists, CRUD and play counts.

use crate::error::{ApiError, ApiResult};
use crate::models::requests::{CaptionBody, CategoryBody, NewPostBody, UserScoped};
use crate::models::{normalize_categories, NewPost, Page, PageRequest, Post, PostUpdate};
use crate::traits::{HttpClient, SecureStore};

use super::client::{decode, own_posts, ApiClient, Method};

impl<H: HttpClient, S: SecureStore> ApiClient<H, S> {
    /// `GET /api/posts/paginated`, optionally narrowed to one category.
    pub async fn posts_page(&self, filter: Option<&str>, request: &PageRequest) -> ApiResult<Page<Post>> {
        let mut path = format!("/api/posts/paginated{}", request.to_query());
        if let Some(filter) = filter.map(str::trim).filter(|f| !f.is_empty()) {
            path.push_str("&filter=");
            path.push_str(&urlencoding::encode(filter));
        }
        self.fetch_posts_page(&path).await
    }

    /// `GET /api/feed/{userId}/paginated`: posts from followed users.
    pub async fn feed_page(&self, user_id: i64, request: &PageRequest) -> ApiResult<Page<Post>> {
        let path = format!("/api/feed/{}/paginated{}", user_id, request.to_query());
        self.fetch_posts_page(&path).await
    }

    pub(crate) async fn fetch_posts_page(&self, path: &str) -> ApiResult<Page<Post>> {
        let (session, auth) = self.bearer().await?;
        let mut page: Page<Post> = self.get_json(path, &auth).await?;
        own_posts(&session, &mut page.data);
        Ok(page)
    }

    pub async fn get_post(&self, post_id: i64) -> ApiResult<Post> {
        let (session, auth) = self.bearer().await?;
        let mut post: Post = self
            .get_json(&format!("/api/posts/{}", post_id), &auth)
            .await?;
        own_posts(&session, [&mut post]);
        Ok(post)
    }

    /// Publish a playlist. Categories are normalized and checked against
    /// the limit before anything is sent.
    pub async fn create_post(&self, post: &NewPost) -> ApiResult<Post> {
        let categories = normalize_categories(&post.categories).map_err(ApiError::validation)?;
        if post.playlist_name.trim().is_empty() {
            return Err(ApiError::validation("A playlist name is required"));
        }
        let (session, auth) = self.bearer().await?;

        let normalized = NewPost {
            categories,
            ..post.clone()
        };
        let body = serde_json::to_string(&NewPostBody {
            user_id: session.user_id,
            post: &normalized,
        })?;
        let response = self.call(Method::Post, "/api/posts", Some(body), &auth).await?;
        let mut created: Post = decode(&response)?;
        own_posts(&session, [&mut created]);
        tracing::info!("Created post {}", created.post_id);
        Ok(created)
    }

    /// `PUT /api/posts/{id}/caption`. Returns the updated post when the
    /// backend sends one back.
    pub async fn update_caption(&self, post_id: i64, caption: &str) -> ApiResult<Option<Post>> {
        let (session, auth) = self.bearer().await?;
        let path = format!("/api/posts/{}/caption", post_id);
        let mut updated: Option<Post> = self
            .send_json(Method::Put, &path, &CaptionBody { caption }, &auth)
            .await?;
        own_posts(&session, updated.iter_mut());
        Ok(updated)
    }

    /// `PUT /api/posts/{id}/category`. More than three categories is
    /// rejected locally.
    pub async fn update_categories(&self, post_id: i64, categories: &[String]) -> ApiResult<Option<Post>> {
        let categories = normalize_categories(categories).map_err(ApiError::validation)?;
        let (session, auth) = self.bearer().await?;
        let path = format!("/api/posts/{}/category", post_id);
        let mut updated: Option<Post> = self
            .send_json(
                Method::Put,
                &path,
                &CategoryBody {
                    categories: &categories,
                },
                &auth,
            )
            .await?;
        own_posts(&session, updated.iter_mut());
        Ok(updated)
    }

    /// `PUT /api/posts/{id}/update`: sync a post with its source playlist.
    pub async fn update_post(&self, post_id: i64, update: &PostUpdate) -> ApiResult<Option<Post>> {
        let (session, auth) = self.bearer().await?;
        let path = format!("/api/posts/{}/update", post_id);
        let mut updated: Option<Post> = self.send_json(Method::Put, &path, update, &auth).await?;
        own_posts(&session, updated.iter_mut());
        Ok(updated)
    }

    pub async fn delete_post(&self, post_id: i64) -> ApiResult<()> {
        let (_, auth) = self.bearer().await?;
        self.call(Method::Delete, &format!("/api/posts/{}", post_id), None, &auth)
            .await?;
        tracing::info!("Deleted post {}", post_id);
        Ok(())
    }

    /// `POST /api/posts/{id}/play`: count a play.
    pub async fn record_play(&self, post_id: i64) -> ApiResult<()> {
        let (session, auth) = self.bearer().await?;
        let path = format!("/api/posts/{}/play", post_id);
        self.send_json::<_, serde_json::Value>(
            Method::Post,
            &path,
            &UserScoped {
                user_id: session.user_id,
            },
            &auth,
        )
        .await?;
        Ok(())
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
        store.insert(StoreKey::UserId, "3");
        store.insert(StoreKey::Username, "dj");
        let http = MockHttpClient::new();
        let api = ApiClient::new(
            ClientConfig::new().with_base_url("https://api.test"),
            http.clone(),
            SessionManager::new(store),
        );
        (api, http)
    }

    fn post_json(id: i64, user_id: i64) -> serde_json::Value {
        json!({"postId": id, "userId": user_id, "username": "u", "playlistName": "P"})
    }

    #[tokio::test]
    async fn test_posts_page_query_and_ownership() {
        let (api, http) = client();
        http.set_default_response(MockResponse::json(
            200,
            json!({"data": [post_json(1, 3), post_json(2, 4)], "nextCursor": "c1", "hasMore": true}),
        ));
        let request = PageRequest {
            limit: 10,
            after: Some("c0".to_string()),
        };

        let page = api.posts_page(Some("hip hop"), &request).await.unwrap();

        assert_eq!(
            http.get_requests()[0].url,
            "https://api.test/api/posts/paginated?limit=10&after=c0&filter=hip%20hop"
        );
        assert!(page.data[0].is_owned_by_current_user);
        assert!(!page.data[1].is_owned_by_current_user);
        assert_eq!(page.next_cursor.as_deref(), Some("c1"));
    }

    #[tokio::test]
    async fn test_too_many_categories_rejected_before_io() {
        let (api, http) = client();
        let categories: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();

        let err = api.update_categories(5, &categories).await.unwrap_err();

        assert!(matches!(err, ApiError::Validation { .. }));
        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_create_post_sends_user_and_normalized_categories() {
        let (api, http) = client();
        http.set_route("POST", "https://api.test/api/posts", MockResponse::json(201, post_json(40, 3)));
        let post = NewPost {
            playlist_id: "pl.9".to_string(),
            playlist_name: "Road".to_string(),
            playlist_image_url: None,
            playlist_url: None,
            tracks: vec![],
            caption: Some("drive".to_string()),
            categories: vec![" rock ".to_string(), "Rock".to_string(), String::new()],
        };

        let created = api.create_post(&post).await.unwrap();

        assert!(created.is_owned_by_current_user);
        let body = http.get_requests()[0].json().unwrap();
        assert_eq!(body["userId"], 3);
        assert_eq!(body["categories"], json!(["rock"]));
    }

    #[tokio::test]
    async fn test_update_caption_with_empty_response() {
        let (api, http) = client();
        http.set_default_response(MockResponse::status(204));
        assert!(api.update_caption(1, "new").await.unwrap().is_none());
        assert_eq!(http.get_requests()[0].method, "PUT");
    }

    #[tokio::test]
    async fn test_get_post_forbidden() {
        let (api, http) = client();
        http.set_default_response(MockResponse::json(403, json!({"message": "private"})));
        let err = api.get_post(1).await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden { .. }));
    }
}
