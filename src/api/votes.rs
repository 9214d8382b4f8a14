//! Post and comment votes.
//!
//! Casting posts `{postId|commentId, userId, voteType}`; clearing a vote is a
//! DELETE keyed by query parameters.

use crate::error::ApiResult;
use crate::models::requests::{CommentVoteBody, VoteBody};
use crate::models::{VoteResult, VoteValue};
use crate::traits::{HttpClient, SecureStore};

use super::client::{decode_optional, ApiClient, Method};

impl<H: HttpClient, S: SecureStore> ApiClient<H, S> {
    /// Set the current user's vote on a post. `VoteValue::None` clears it.
    ///
    /// Returns whatever authoritative vote fields the backend sent back.
    pub async fn vote_post(&self, post_id: i64, value: VoteValue) -> ApiResult<Option<VoteResult>> {
        let (session, auth) = self.bearer().await?;
        if value == VoteValue::None {
            let path = format!("/api/votes?postId={}&userId={}", post_id, session.user_id);
            let response = self.call(Method::Delete, &path, None, &auth).await?;
            return Ok(decode_optional(&response));
        }
        let body = VoteBody {
            post_id,
            user_id: session.user_id,
            vote_type: value,
        };
        self.send_json(Method::Post, "/api/votes", &body, &auth).await
    }

    /// Set the current user's vote on a comment. `VoteValue::None` clears it.
    pub async fn vote_comment(&self, comment_id: i64, value: VoteValue) -> ApiResult<Option<VoteResult>> {
        let (session, auth) = self.bearer().await?;
        if value == VoteValue::None {
            let path = format!(
                "/api/comment-votes?commentId={}&userId={}",
                comment_id, session.user_id
            );
            let response = self.call(Method::Delete, &path, None, &auth).await?;
            return Ok(decode_optional(&response));
        }
        let body = CommentVoteBody {
            comment_id,
            user_id: session.user_id,
            vote_type: value,
        };
        self.send_json(Method::Post, "/api/comment-votes", &body, &auth)
            .await
    }
}
