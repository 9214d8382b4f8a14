//! Request bodies sent to the backend.

use serde::Serialize;

use super::track::{serialize_tracks, Track};
use super::vote::VoteValue;

/// Apple sign-in payload, produced by the platform SDK.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppleSignIn {
    pub identity_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Google sign-in payload, produced by the platform SDK.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleSignIn {
    pub id_token: String,
}

/// Which provider a sign-in goes through.
#[derive(Debug, Clone)]
pub enum SignInRequest {
    Apple(AppleSignIn),
    Google(GoogleSignIn),
}

impl SignInRequest {
    /// Endpoint path for this provider.
    pub fn path(&self) -> &'static str {
        match self {
            SignInRequest::Apple(_) => "/api/auth/apple/signin",
            SignInRequest::Google(_) => "/api/auth/google/signin",
        }
    }

    /// Value stored under `authProvider`.
    pub fn provider(&self) -> &'static str {
        match self {
            SignInRequest::Apple(_) => "apple",
            SignInRequest::Google(_) => "google",
        }
    }

    pub(crate) fn body(&self) -> Result<String, serde_json::Error> {
        match self {
            SignInRequest::Apple(req) => serde_json::to_string(req),
            SignInRequest::Google(req) => serde_json::to_string(req),
        }
    }
}

/// A new playlist post.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub playlist_id: String,
    pub playlist_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_url: Option<String>,
    #[serde(serialize_with = "serialize_tracks")]
    pub tracks: Vec<Track>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub categories: Vec<String>,
}

/// Body of `PUT /api/posts/{id}/update`: refresh playlist contents after the
/// source playlist changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_opt_tracks")]
    pub tracks: Option<Vec<Track>>,
}

fn serialize_opt_tracks<S>(tracks: &Option<Vec<Track>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match tracks {
        Some(t) => serialize_tracks(t, serializer),
        None => serializer.serialize_none(),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserScoped {
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewPostBody<'a> {
    pub user_id: i64,
    #[serde(flatten)]
    pub post: &'a NewPost,
}

#[derive(Debug, Serialize)]
pub(crate) struct CaptionBody<'a> {
    pub caption: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CategoryBody<'a> {
    pub categories: &'a [String],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VoteBody {
    pub post_id: i64,
    pub user_id: i64,
    pub vote_type: VoteValue,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentVoteBody {
    pub comment_id: i64,
    pub user_id: i64,
    pub vote_type: VoteValue,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SavedPostBody {
    pub post_id: i64,
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FollowBody {
    pub follower_id: i64,
    pub following_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewCommentBody<'a> {
    pub post_id: i64,
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<i64>,
    pub text: &'a str,
}

/// Why something is being reported.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportReason {
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlaylistReportBody<'a> {
    pub reporter_id: i64,
    pub post_id: i64,
    #[serde(flatten)]
    pub reason: &'a ReportReason,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentReportBody<'a> {
    pub reporter_id: i64,
    pub comment_id: i64,
    #[serde(flatten)]
    pub reason: &'a ReportReason,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoreUserTokenBody<'a> {
    pub music_user_token: &'a str,
}
