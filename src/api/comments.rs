//! Comments on a post.

use crate::error::{ApiError, ApiResult};
use crate::models::requests::NewCommentBody;
use crate::models::{build_comment_tree, Comment};
use crate::traits::{HttpClient, SecureStore};

use super::client::{decode, own_comments, ApiClient, Method};

impl<H: HttpClient, S: SecureStore> ApiClient<H, S> {
    /// Comments on a post as a two-level tree, ownership already marked.
    pub async fn comments(&self, post_id: i64) -> ApiResult<Vec<Comment>> {
        let (session, auth) = self.bearer().await?;
        let flat: Vec<Comment> = self
            .get_json(&format!("/api/comments/post/{}", post_id), &auth)
            .await?;
        let mut tree = build_comment_tree(flat);
        own_comments(&session, &mut tree);
        Ok(tree)
    }

    /// Post a comment, or a reply when `parent_comment_id` is set.
    pub async fn create_comment(
        &self,
        post_id: i64,
        text: &str,
        parent_comment_id: Option<i64>,
    ) -> ApiResult<Comment> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ApiError::validation("Comment can't be empty"));
        }
        let (session, auth) = self.bearer().await?;
        let body = serde_json::to_string(&NewCommentBody {
            post_id,
            user_id: session.user_id,
            parent_comment_id,
            text,
        })?;
        let response = self
            .call(Method::Post, "/api/comments", Some(body), &auth)
            .await?;
        let mut comment: Comment = decode(&response)?;
        if comment.parent_comment_id.is_none() {
            comment.parent_comment_id = parent_comment_id;
        }
        comment.mark_ownership(session.user_id, &session.username);
        Ok(comment)
    }

    pub async fn delete_comment(&self, comment_id: i64) -> ApiResult<()> {
        let (_, auth) = self.bearer().await?;
        self.call(
            Method::Delete,
            &format!("/api/comments/{}", comment_id),
            None,
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
        store.insert(StoreKey::UserId, "7");
        store.insert(StoreKey::Username, "ana");
        let http = MockHttpClient::new();
        let api = ApiClient::new(
            ClientConfig::new().with_base_url("https://api.test"),
            http.clone(),
            SessionManager::new(store),
        );
        (api, http)
    }

    #[tokio::test]
    async fn test_comments_are_nested_and_owned() {
        let (api, http) = client();
        http.set_default_response(MockResponse::json(
            200,
            json!([
                {"id": 1, "userId": 7, "username": "ana", "text": "top"},
                {"id": 2, "parentCommentId": 1, "userId": 8, "username": "bo", "text": "reply"},
                {"id": 3, "parentCommentId": 2, "userId": 7, "username": "ana", "text": "deep"}
            ]),
        ));

        let tree = api.comments(11).await.unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].replies.len(), 2);
        assert!(tree[0].is_owned_by_current_user);
        assert!(!tree[0].replies[0].is_owned_by_current_user);
        assert!(tree[0].replies[1].is_owned_by_current_user);
    }

    #[tokio::test]
    async fn test_empty_comment_rejected_locally() {
        let (api, http) = client();
        let err = api.create_comment(1, "   ", None).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_create_reply() {
        let (api, http) = client();
        http.set_default_response(MockResponse::json(
            201,
            json!({"id": 20, "username": "ana", "content": "nice"}),
        ));

        let reply = api.create_comment(1, " nice ", Some(4)).await.unwrap();

        assert_eq!(reply.parent_comment_id, Some(4));
        assert!(reply.is_owned_by_current_user);
        let body = http.get_requests()[0].json().unwrap();
        assert_eq!(body["text"], "nice");
        assert_eq!(body["parentCommentId"], 4);
    }
}
