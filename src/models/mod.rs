//! Client-side projections of backend resources.
//!
//! All of these are transient: created on fetch, patched in place by
//! optimistic handlers, discarded with the screen that owns them.

pub mod comment;
pub mod music;
pub mod page;
pub mod post;
pub mod requests;
pub mod track;
pub mod user;
pub mod vote;

use serde::{Deserialize, Serialize};

pub use comment::{build_comment_tree, Comment};
pub use music::{DeveloperToken, MusicPlaylist, PlaylistDetails};
pub use page::{Page, PageRequest};
pub use post::{normalize_categories, Post, MAX_CATEGORIES};
pub use requests::{AppleSignIn, GoogleSignIn, NewPost, PostUpdate, ReportReason, SignInRequest};
pub use track::Track;
pub use user::{AuthResponse, FollowTotals, FollowUser, User};
pub use vote::VoteValue;

/// Results of `GET /api/search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub users: Vec<FollowUser>,
    #[serde(default)]
    pub posts: Vec<Post>,
}

/// Authoritative vote fields returned after a vote mutation.
///
/// Either field may be absent; absent fields keep the optimistic value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResult {
    #[serde(default, alias = "votes")]
    pub net_votes: Option<i64>,
    #[serde(default)]
    pub user_vote: Option<VoteValue>,
}
