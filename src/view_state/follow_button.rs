//! Follow/unfollow on a profile header.

use crate::api::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::optimistic::{toggle, Optimistic};
use crate::traits::{HttpClient, SecureStore};

use super::MountGuard;

/// What the button and the follower counter show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FollowState {
    pub is_following: bool,
    pub follower_count: i64,
}

impl FollowState {
    fn flip(&mut self) {
        self.is_following = toggle(self.is_following);
        self.follower_count += if self.is_following { 1 } else { -1 };
        self.follower_count = self.follower_count.max(0);
    }
}

/// A follow toggle applied locally and waiting for the backend.
#[derive(Debug)]
pub struct PendingFollow {
    patch: Optimistic<FollowState>,
    /// The state being sent: `true` to follow.
    pub following: bool,
}

#[derive(Debug)]
pub struct FollowButton {
    user_id: i64,
    state: FollowState,
    guard: MountGuard,
    error: Option<ApiError>,
}

impl FollowButton {
    pub fn new(user_id: i64, state: FollowState, guard: MountGuard) -> Self {
        Self {
            user_id,
            state,
            guard,
            error: None,
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn state(&self) -> FollowState {
        self.state
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    /// Flip the follow state locally. The UI reflects it immediately.
    pub fn begin_toggle(&mut self) -> PendingFollow {
        let patch = Optimistic::begin(&mut self.state, FollowState::flip);
        tracing::debug!(
            "User {} follow -> {}",
            self.user_id,
            self.state.is_following
        );
        PendingFollow {
            patch,
            following: self.state.is_following,
        }
    }

    /// Keep the flip on success, restore it on failure.
    pub fn finish_toggle(&mut self, pending: PendingFollow, result: ApiResult<()>) -> ApiResult<()> {
        if !self.guard.is_mounted() {
            tracing::debug!("User {} unmounted, dropping follow result", self.user_id);
            return result;
        }
        let settled = pending.patch.settle(&mut self.state, result, |_, ()| {});
        self.error = settled.as_ref().err().cloned();
        settled
    }

    /// Flip the follow state immediately, then follow or unfollow.
    pub async fn toggle<H: HttpClient, S: SecureStore>(&mut self, api: &ApiClient<H, S>) -> ApiResult<()> {
        let pending = self.begin_toggle();
        let result = if pending.following {
            api.follow(self.user_id).await
        } else {
            api.unfollow(self.user_id).await
        };
        self.finish_toggle(pending, result)
    }
}
