//! Optimistic mutation with snapshot rollback.
//!
//! A mutation is split into three steps so the transition logic stays pure
//! and testable without HTTP:
//!
//! 1. [`Optimistic::begin`] snapshots the state and applies a local patch.
//! 2. The caller performs the network call.
//! 3. [`Optimistic::commit`] merges the authoritative response, or
//!    [`Optimistic::rollback`] restores the snapshot exactly.
//!
//! Rapid repeated mutations on the same state are neither queued nor
//! coalesced: each `begin` snapshots whatever the previous patch produced,
//! and whichever response settles last wins.

pub mod vote;

use std::future::Future;

use crate::error::ApiResult;

pub use vote::{vote_transition, VoteAction, VoteState, VoteTransition};

/// Two-state toggle used by save/unsave and follow/unfollow.
pub fn toggle(current: bool) -> bool {
    !current
}

/// A pending optimistic patch holding the pre-mutation snapshot.
#[derive(Debug)]
#[must_use = "an optimistic patch must be committed or rolled back"]
pub struct Optimistic<S> {
    snapshot: S,
}

impl<S: Clone> Optimistic<S> {
    /// Snapshot `state`, then patch it in place.
    pub fn begin(state: &mut S, patch: impl FnOnce(&mut S)) -> Self {
        let snapshot = state.clone();
        patch(state);
        Self { snapshot }
    }

    /// The state as it was before the patch.
    pub fn snapshot(&self) -> &S {
        &self.snapshot
    }

    /// Keep the patch, merging authoritative fields.
    pub fn commit(self, state: &mut S, reconcile: impl FnOnce(&mut S)) {
        reconcile(state);
    }

    /// Restore the pre-mutation snapshot.
    pub fn rollback(self, state: &mut S) {
        *state = self.snapshot;
    }

    /// Commit on `Ok`, roll back on `Err`, and pass the error through.
    pub fn settle<T>(
        self,
        state: &mut S,
        result: ApiResult<T>,
        reconcile: impl FnOnce(&mut S, T),
    ) -> ApiResult<()> {
        match result {
            Ok(value) => {
                self.commit(state, |s| reconcile(s, value));
                Ok(())
            }
            Err(e) => {
                tracing::debug!("Rolling back optimistic patch: {}", e);
                self.rollback(state);
                Err(e)
            }
        }
    }
}

/// Patch, call, then reconcile or roll back, in one step.
///
/// `call` receives the patched state and must return a future that owns
/// everything it needs.
pub async fn run_optimistic<S, T, F, Fut>(
    state: &mut S,
    patch: impl FnOnce(&mut S),
    call: F,
    reconcile: impl FnOnce(&mut S, T),
) -> ApiResult<()>
where
    S: Clone,
    F: FnOnce(&S) -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    let pending = Optimistic::begin(state, patch);
    let result = call(&*state).await;
    pending.settle(state, result, reconcile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[derive(Debug, Clone, PartialEq)]
    struct Card {
        saved: bool,
        note: String,
    }

    #[test]
    fn test_toggle() {
        assert!(toggle(false));
        assert!(!toggle(true));
    }

    #[test]
    fn test_rollback_restores_exactly() {
        let mut card = Card {
            saved: false,
            note: "before".to_string(),
        };
        let original = card.clone();

        let pending = Optimistic::begin(&mut card, |c| {
            c.saved = toggle(c.saved);
            c.note = "patched".to_string();
        });
        assert!(card.saved);

        pending.rollback(&mut card);
        assert_eq!(card, original);
    }

    #[test]
    fn test_commit_keeps_patch_and_reconciles() {
        let mut card = Card {
            saved: false,
            note: String::new(),
        };
        let pending = Optimistic::begin(&mut card, |c| c.saved = true);
        pending.commit(&mut card, |c| c.note = "server".to_string());
        assert!(card.saved);
        assert_eq!(card.note, "server");
    }

    #[test]
    fn test_second_patch_builds_on_first() {
        let mut votes = VoteState::default();
        let first = Optimistic::begin(&mut votes, |v| {
            v.apply(VoteAction::Upvote);
        });
        let second = Optimistic::begin(&mut votes, |v| {
            v.apply(VoteAction::Upvote);
        });
        assert_eq!(second.snapshot().net_votes, 1);
        assert_eq!(votes, VoteState::default());

        // First call resolves after the second patch: its reconcile wins.
        second.commit(&mut votes, |_| {});
        first.commit(&mut votes, |v| v.net_votes = 1);
        assert_eq!(votes.net_votes, 1);
    }

    #[tokio::test]
    async fn test_run_optimistic_failure_rolls_back() {
        let mut card = Card {
            saved: true,
            note: "n".to_string(),
        };
        let original = card.clone();

        let result = run_optimistic(
            &mut card,
            |c| c.saved = toggle(c.saved),
            |c| {
                assert!(!c.saved);
                async {
                    Err::<(), _>(ApiError::Network {
                        message: "offline".to_string(),
                    })
                }
            },
            |_, _| {},
        )
        .await;

        assert!(matches!(result, Err(ApiError::Network { .. })));
        assert_eq!(card, original);
    }

    #[tokio::test]
    async fn test_run_optimistic_success_reconciles() {
        let mut votes = VoteState::new(crate::models::VoteValue::Down, 5);
        run_optimistic(
            &mut votes,
            |v| {
                v.apply(VoteAction::Upvote);
            },
            |_| async { Ok(7_i64) },
            |v, net| v.net_votes = net,
        )
        .await
        .unwrap();
        assert_eq!(votes, VoteState::new(crate::models::VoteValue::Up, 7));
    }
}
