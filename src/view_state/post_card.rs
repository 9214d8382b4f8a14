//! A post card: vote and save with optimistic patching.

use crate::api::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::models::{Post, VoteResult};
use crate::optimistic::{
    toggle, vote_transition, Optimistic, VoteAction, VoteState, VoteTransition,
};
use crate::traits::{HttpClient, SecureStore};

use super::MountGuard;

/// A vote applied locally and waiting for the backend.
#[derive(Debug)]
#[must_use = "pass the pending vote back to PostCard::finish_vote"]
pub struct PendingVote {
    patch: Optimistic<VoteState>,
    pub transition: VoteTransition,
}

/// A save toggle applied locally and waiting for the backend.
#[derive(Debug)]
#[must_use = "pass the pending save back to PostCard::finish_save"]
pub struct PendingSave {
    patch: Optimistic<bool>,
    /// The saved flag the user asked for.
    pub saved: bool,
}

/// View state for one post.
#[derive(Debug)]
pub struct PostCard {
    post: Post,
    guard: MountGuard,
    error: Option<ApiError>,
}

impl PostCard {
    pub fn new(post: Post, guard: MountGuard) -> Self {
        Self {
            post,
            guard,
            error: None,
        }
    }

    pub fn post(&self) -> &Post {
        &self.post
    }

    pub fn votes(&self) -> VoteState {
        VoteState::new(self.post.user_vote, self.post.net_votes)
    }

    /// Non-blocking error from the last mutation, for a toast.
    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Apply a vote locally. The UI reflects it immediately.
    pub fn begin_vote(&mut self, action: VoteAction) -> PendingVote {
        let mut votes = self.votes();
        let transition = vote_transition(votes.user_vote, action);
        let patch = Optimistic::begin(&mut votes, |v| {
            v.apply(action);
        });
        self.set_votes(votes);
        tracing::debug!(
            "Post {} vote {:?} -> {:?} ({:+})",
            self.post.post_id,
            transition.previous,
            transition.value,
            transition.delta
        );
        PendingVote { patch, transition }
    }

    /// Reconcile with the backend's answer, or restore the pre-vote state.
    pub fn finish_vote(
        &mut self,
        pending: PendingVote,
        result: ApiResult<Option<VoteResult>>,
    ) -> ApiResult<()> {
        if !self.guard.is_mounted() {
            tracing::debug!("Post {} unmounted, dropping vote result", self.post.post_id);
            return result.map(|_| ());
        }
        let mut votes = self.votes();
        let settled = pending.patch.settle(&mut votes, result, |v, server| {
            if let Some(server) = server {
                v.reconcile(&server);
            }
        });
        self.set_votes(votes);
        self.record(settled)
    }

    /// Vote through the api client.
    pub async fn vote<H: HttpClient, S: SecureStore>(
        &mut self,
        api: &ApiClient<H, S>,
        action: VoteAction,
    ) -> ApiResult<()> {
        let pending = self.begin_vote(action);
        let result = api
            .vote_post(self.post.post_id, pending.transition.value)
            .await;
        self.finish_vote(pending, result)
    }

    pub fn begin_save(&mut self) -> PendingSave {
        let patch = Optimistic::begin(&mut self.post.is_saved, |s| *s = toggle(*s));
        PendingSave {
            patch,
            saved: self.post.is_saved,
        }
    }

    /// Keep the toggle on success (there is no body to reconcile), restore it
    /// on failure.
    pub fn finish_save(&mut self, pending: PendingSave, result: ApiResult<()>) -> ApiResult<()> {
        if !self.guard.is_mounted() {
            tracing::debug!("Post {} unmounted, dropping save result", self.post.post_id);
            return result;
        }
        let settled = pending
            .patch
            .settle(&mut self.post.is_saved, result, |_, ()| {});
        self.record(settled)
    }

    pub async fn toggle_save<H: HttpClient, S: SecureStore>(
        &mut self,
        api: &ApiClient<H, S>,
    ) -> ApiResult<()> {
        let pending = self.begin_save();
        let result = if pending.saved {
            api.save_post(self.post.post_id).await
        } else {
            api.unsave_post(self.post.post_id).await
        };
        self.finish_save(pending, result)
    }

    fn set_votes(&mut self, votes: VoteState) {
        self.post.user_vote = votes.user_vote;
        self.post.net_votes = votes.net_votes;
    }

    fn record(&mut self, result: ApiResult<()>) -> ApiResult<()> {
        self.error = result.as_ref().err().cloned();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VoteValue;

    fn card(user_vote: VoteValue, net_votes: i64) -> PostCard {
        let post: Post = serde_json::from_value(serde_json::json!({
            "postId": 1,
            "username": "u",
            "playlistName": "P",
        }))
        .unwrap();
        PostCard::new(
            Post {
                user_vote,
                net_votes,
                ..post
            },
            MountGuard::new(),
        )
    }

    fn network() -> ApiError {
        ApiError::Network {
            message: "offline".to_string(),
        }
    }

    #[test]
    fn test_upvote_from_down_then_confirmed() {
        let mut card = card(VoteValue::Down, 5);

        let pending = card.begin_vote(VoteAction::Upvote);
        assert_eq!(card.votes(), VoteState::new(VoteValue::Up, 7));

        card.finish_vote(
            pending,
            Ok(Some(VoteResult {
                net_votes: Some(7),
                user_vote: None,
            })),
        )
        .unwrap();
        assert_eq!(card.votes(), VoteState::new(VoteValue::Up, 7));
    }

    #[test]
    fn test_upvote_from_down_then_error_reverts() {
        let mut card = card(VoteValue::Down, 5);

        let pending = card.begin_vote(VoteAction::Upvote);
        let result = card.finish_vote(pending, Err(network()));

        assert!(result.is_err());
        assert_eq!(card.votes(), VoteState::new(VoteValue::Down, 5));
        assert!(card.error().is_some());
    }

    #[test]
    fn test_save_failure_restores_snapshot_exactly() {
        let mut card = card(VoteValue::None, 0);
        let before = card.post().clone();

        let pending = card.begin_save();
        assert!(pending.saved);
        assert!(card.post().is_saved);
        card.finish_save(pending, Err(network())).unwrap_err();

        assert_eq!(card.post(), &before);
    }

    #[test]
    fn test_unmounted_card_ignores_result() {
        let guard = MountGuard::new();
        let mut card = card(VoteValue::None, 3);
        card.guard = guard.clone();

        let pending = card.begin_vote(VoteAction::Downvote);
        guard.unmount();
        let _ = card.finish_vote(pending, Err(network()));

        assert_eq!(card.votes(), VoteState::new(VoteValue::Down, 2));
        assert!(card.error().is_none());
    }

    #[test]
    fn test_second_vote_before_first_resolves() {
        let mut card = card(VoteValue::None, 10);

        let first = card.begin_vote(VoteAction::Upvote);
        let second = card.begin_vote(VoteAction::Upvote);
        assert_eq!(second.transition.value, VoteValue::None);
        assert_eq!(card.votes(), VoteState::new(VoteValue::None, 10));

        card.finish_vote(second, Ok(None)).unwrap();
        card.finish_vote(
            first,
            Ok(Some(VoteResult {
                net_votes: Some(11),
                user_vote: Some(VoteValue::Up),
            })),
        )
        .unwrap();
        assert_eq!(card.votes(), VoteState::new(VoteValue::Up, 11));
    }
}
