//! Playlist posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::track::{deserialize_tracks, serialize_tracks, Track};
use super::vote::{nullable_vote, VoteValue};

/// A post may carry at most this many categories.
pub const MAX_CATEGORIES: usize = 3;

/// Client-side copy of a server-owned playlist post.
///
/// `net_votes`, `user_vote` and `is_saved` are patched optimistically and
/// overwritten by the next authoritative response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(alias = "id")]
    pub post_id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub username: String,
    pub playlist_name: String,
    #[serde(default)]
    pub playlist_image_url: Option<String>,
    #[serde(default)]
    pub playlist_url: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_tracks",
        serialize_with = "serialize_tracks"
    )]
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub net_votes: i64,
    #[serde(default, deserialize_with = "nullable_vote")]
    pub user_vote: VoteValue,
    #[serde(default)]
    pub is_saved: bool,
    #[serde(default)]
    pub play_count: Option<i64>,
    #[serde(default)]
    pub comment_count: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Set once at fetch time from the session user id.
    #[serde(skip)]
    pub is_owned_by_current_user: bool,
}

impl Post {
    /// Compute the ownership flag against the signed-in user.
    ///
    /// Falls back to the username only when the backend omitted the owner id.
    pub fn mark_ownership(&mut self, user_id: i64, username: &str) {
        self.is_owned_by_current_user = match self.user_id {
            Some(owner) => owner == user_id,
            None => self.username == username,
        };
    }
}

/// Normalize a category list: trim, drop blanks and duplicates, keep order.
///
/// Returns an error message when more than [`MAX_CATEGORIES`] remain.
pub fn normalize_categories(categories: &[String]) -> Result<Vec<String>, String> {
    let mut out: Vec<String> = Vec::new();
    for c in categories {
        let c = c.trim();
        if c.is_empty() || out.iter().any(|seen| seen.eq_ignore_ascii_case(c)) {
            continue;
        }
        out.push(c.to_string());
    }
    if out.len() > MAX_CATEGORIES {
        return Err(format!(
            "A post can have at most {} categories",
            MAX_CATEGORIES
        ));
    }
    Ok(out)
}
