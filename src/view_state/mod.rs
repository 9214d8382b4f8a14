//! Per-screen state containers.
//!
//! Each container owns the fetched resource for one screen element and
//! applies mutations optimistically through [`crate::optimistic`]. Two
//! containers never share state, so mutations on different resources cannot
//! interfere. A [`MountGuard`] shared with the screen decides whether a
//! late response is still committed.
//!
//! - [`PostCard`]: vote and save on one post
//! - [`CommentThread`]: the comment tree under a post
//! - [`FollowButton`]: follow toggle with follower count
//!
//! Paginated lists use [`crate::pagination::PaginatedList`] directly.

mod comment_thread;
mod follow_button;
mod mount;
mod post_card;

pub use comment_thread::CommentThread;
pub use follow_button::{FollowButton, FollowState, PendingFollow};
pub use mount::MountGuard;
pub use post_card::{PendingSave, PendingVote, PostCard};
