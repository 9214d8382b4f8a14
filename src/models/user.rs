//! Users, sign-in responses and the social graph.

use serde::{Deserialize, Serialize};

/// A user account as returned by `/api/users/me` and sign-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "userId")]
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "email")]
    pub email_address: Option<String>,
    #[serde(default)]
    pub auth_provider: Option<String>,
    #[serde(default, alias = "musicConnected")]
    pub apple_music_connected: bool,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub follower_count: i64,
    #[serde(default)]
    pub following_count: i64,
}

/// Response of the sign-in endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Response of `GET /api/users/username/{u}/id`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserIdResponse {
    #[serde(alias = "id")]
    pub user_id: i64,
}

/// Response of `GET /api/users/{id}/username`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UsernameResponse {
    pub username: String,
}

/// A row in a followers/following list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUser {
    #[serde(alias = "userId")]
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_following: bool,
}

/// Response of the `.../total` follow endpoints.
#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct CountResponse {
    #[serde(alias = "count")]
    pub total: i64,
}

/// Follower and following totals for a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FollowTotals {
    pub followers: i64,
    pub following: i64,
}
