//! Typed client for the playshare backend.
//!
//! [`ApiClient`] is split across one file per endpoint group; every group
//! shares request construction from [`client`]:
//!
//! - every call except sign-in and the health check carries
//!   `Authorization: Bearer <token>` read from the session store, and fails
//!   with [`ApiError::AuthenticationMissing`](crate::error::ApiError) before
//!   any I/O when there is no session
//! - a 401 on an authenticated call clears the session
//! - posts and comments come back with their ownership flag computed

pub mod auth;
pub mod client;
pub mod comments;
pub mod follows;
pub mod music;
pub mod posts;
pub mod reports;
pub mod saved;
pub mod search;
pub mod sources;
pub mod users;
pub mod votes;

pub use client::ApiClient;
pub use sources::{FeedSource, PostsSource, SavedSource};
