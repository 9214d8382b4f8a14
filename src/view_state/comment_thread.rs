//! The comment thread under a post.

use crate::api::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::models::Comment;
use crate::optimistic::{Optimistic, VoteAction, VoteState};
use crate::traits::{HttpClient, SecureStore};

use super::MountGuard;

/// Where a comment sat before it was optimistically removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Top(usize),
    Reply { parent: usize, index: usize },
}

/// A two-level comment tree with optimistic vote and delete.
#[derive(Debug)]
pub struct CommentThread {
    post_id: i64,
    comments: Vec<Comment>,
    guard: MountGuard,
    loading: bool,
    error: Option<ApiError>,
}

impl CommentThread {
    pub fn new(post_id: i64, guard: MountGuard) -> Self {
        Self {
            post_id,
            comments: Vec::new(),
            guard,
            loading: false,
            error: None,
        }
    }

    pub fn post_id(&self) -> i64 {
        self.post_id
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    /// Top-level and reply count together.
    pub fn total(&self) -> usize {
        self.comments.iter().map(|c| 1 + c.replies.len()).sum()
    }

    /// Replace the thread with a freshly fetched tree. On failure the
    /// current comments stay.
    pub async fn load<H: HttpClient, S: SecureStore>(&mut self, api: &ApiClient<H, S>) -> ApiResult<()> {
        self.loading = true;
        let result = api.comments(self.post_id).await;
        self.loading = false;
        if !self.guard.is_mounted() {
            return result.map(|_| ());
        }
        match result {
            Ok(tree) => {
                self.comments = tree;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    pub fn find(&self, id: i64) -> Option<&Comment> {
        self.comments.iter().find_map(|c| {
            if c.id == id {
                Some(c)
            } else {
                c.replies.iter().find(|r| r.id == id)
            }
        })
    }

    fn find_mut(&mut self, id: i64) -> Option<&mut Comment> {
        for c in &mut self.comments {
            if c.id == id {
                return Some(c);
            }
            if let Some(r) = c.replies.iter_mut().find(|r| r.id == id) {
                return Some(r);
            }
        }
        None
    }

    /// Vote on a comment with the same transition table as posts.
    pub async fn vote<H: HttpClient, S: SecureStore>(
        &mut self,
        api: &ApiClient<H, S>,
        comment_id: i64,
        action: VoteAction,
    ) -> ApiResult<()> {
        let Some(comment) = self.find_mut(comment_id) else {
            return Err(ApiError::NotFound {
                message: format!("comment {} is not in this thread", comment_id),
            });
        };
        let mut votes = VoteState::new(comment.user_vote, comment.votes);
        let patch = Optimistic::begin(&mut votes, |v| {
            v.apply(action);
        });
        comment.user_vote = votes.user_vote;
        comment.votes = votes.net_votes;
        let value = votes.user_vote;

        let result = api.vote_comment(comment_id, value).await;
        if !self.guard.is_mounted() {
            return result.map(|_| ());
        }

        // The comment may have been removed while the vote was in flight.
        let Some(comment) = self.find_mut(comment_id) else {
            return result.map(|_| ());
        };
        let mut votes = VoteState::new(comment.user_vote, comment.votes);
        let settled = patch.settle(&mut votes, result, |v, server| {
            if let Some(server) = server {
                v.reconcile(&server);
            }
        });
        comment.user_vote = votes.user_vote;
        comment.votes = votes.net_votes;
        self.record(settled)
    }

    /// Remove a comment immediately, put it back where it was if the
    /// backend refuses.
    pub async fn delete<H: HttpClient, S: SecureStore>(
        &mut self,
        api: &ApiClient<H, S>,
        comment_id: i64,
    ) -> ApiResult<()> {
        let Some((slot, removed)) = self.take(comment_id) else {
            return Err(ApiError::NotFound {
                message: format!("comment {} is not in this thread", comment_id),
            });
        };

        let result = api.delete_comment(comment_id).await;
        if !self.guard.is_mounted() {
            return result;
        }
        if let Err(e) = &result {
            tracing::debug!("Restoring comment {} after failed delete: {}", comment_id, e);
            self.restore(slot, removed);
        }
        self.record(result)
    }

    /// Post a comment or reply and append it once the backend accepts it.
    pub async fn add<H: HttpClient, S: SecureStore>(
        &mut self,
        api: &ApiClient<H, S>,
        text: &str,
        parent_comment_id: Option<i64>,
    ) -> ApiResult<()> {
        let result = api
            .create_comment(self.post_id, text, parent_comment_id)
            .await;
        if !self.guard.is_mounted() {
            return result.map(|_| ());
        }
        match result {
            Ok(comment) => {
                self.append(comment);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Insert a new comment, keeping depth at two: a reply to a reply is
    /// attached to the top-level ancestor.
    pub fn append(&mut self, mut comment: Comment) {
        let root = comment.parent_comment_id.and_then(|parent| {
            self.comments
                .iter()
                .position(|c| c.id == parent || c.replies.iter().any(|r| r.id == parent))
        });
        match root {
            Some(index) => {
                comment.parent_comment_id = Some(self.comments[index].id);
                comment.replies.clear();
                self.comments[index].replies.push(comment);
            }
            None => {
                comment.parent_comment_id = None;
                self.comments.push(comment);
            }
        }
    }

    fn take(&mut self, id: i64) -> Option<(Slot, Comment)> {
        if let Some(index) = self.comments.iter().position(|c| c.id == id) {
            return Some((Slot::Top(index), self.comments.remove(index)));
        }
        for (parent, c) in self.comments.iter_mut().enumerate() {
            if let Some(index) = c.replies.iter().position(|r| r.id == id) {
                return Some((Slot::Reply { parent, index }, c.replies.remove(index)));
            }
        }
        None
    }

    fn restore(&mut self, slot: Slot, comment: Comment) {
        match slot {
            Slot::Top(index) => {
                let index = index.min(self.comments.len());
                self.comments.insert(index, comment);
            }
            Slot::Reply { parent, index } => match self.comments.get_mut(parent) {
                Some(p) => {
                    let index = index.min(p.replies.len());
                    p.replies.insert(index, comment);
                }
                None => self.comments.push(comment),
            },
        }
    }

    fn record(&mut self, result: ApiResult<()>) -> ApiResult<()> {
        self.error = result.as_ref().err().cloned();
        result
    }
}
