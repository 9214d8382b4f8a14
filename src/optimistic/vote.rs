//! The three-state vote toggle shared by posts and comments.
//!
//! | current | upvote   | downvote |
//! |---------|----------|----------|
//! | none    | up (+1)  | down (−1)|
//! | up      | none (−1)| down (−2)|
//! | down    | up (+2)  | none (+1)|

use crate::models::{VoteResult, VoteValue};

/// What the user pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteAction {
    Upvote,
    Downvote,
}

/// Outcome of applying a [`VoteAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteTransition {
    pub previous: VoteValue,
    pub value: VoteValue,
    /// `value - previous`, in −2..=2.
    pub delta: i64,
}

/// Pure transition function.
pub fn vote_transition(current: VoteValue, action: VoteAction) -> VoteTransition {
    let value = match (current, action) {
        (VoteValue::Up, VoteAction::Upvote) | (VoteValue::Down, VoteAction::Downvote) => {
            VoteValue::None
        }
        (_, VoteAction::Upvote) => VoteValue::Up,
        (_, VoteAction::Downvote) => VoteValue::Down,
    };
    VoteTransition {
        previous: current,
        value,
        delta: value.as_i64() - current.as_i64(),
    }
}

/// The vote fields a card displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoteState {
    pub user_vote: VoteValue,
    pub net_votes: i64,
}

impl VoteState {
    pub fn new(user_vote: VoteValue, net_votes: i64) -> Self {
        Self {
            user_vote,
            net_votes,
        }
    }

    /// Apply an action locally, returning the transition that was applied.
    pub fn apply(&mut self, action: VoteAction) -> VoteTransition {
        let transition = vote_transition(self.user_vote, action);
        self.user_vote = transition.value;
        self.net_votes += transition.delta;
        transition
    }

    /// Overwrite with whatever authoritative fields the server returned.
    pub fn reconcile(&mut self, result: &VoteResult) {
        if let Some(net) = result.net_votes {
            self.net_votes = net;
        }
        if let Some(vote) = result.user_vote {
            self.user_vote = vote;
        }
    }
}
