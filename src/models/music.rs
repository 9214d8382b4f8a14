//! Music-streaming account linking and library browsing.

use serde::{Deserialize, Serialize};

use super::track::{deserialize_tracks, Track};

/// Token used to initialise the streaming service's client SDK.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeveloperToken {
    #[serde(alias = "developerToken")]
    pub token: String,
}

/// A playlist in the user's linked library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicPlaylist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artwork_url: Option<String>,
    #[serde(default)]
    pub track_count: Option<u32>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Full playlist with tracks, used to prefill a new post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistDetails {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub artwork_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_tracks")]
    pub tracks: Vec<Track>,
}

/// `GET /api/music/playlists` returns either a bare list or
/// `{ "playlists": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum PlaylistsResponse {
    Wrapped { playlists: Vec<MusicPlaylist> },
    Bare(Vec<MusicPlaylist>),
}

impl PlaylistsResponse {
    pub(crate) fn into_vec(self) -> Vec<MusicPlaylist> {
        match self {
            PlaylistsResponse::Wrapped { playlists } => playlists,
            PlaylistsResponse::Bare(list) => list,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playlists_response_shapes() {
        let wrapped: PlaylistsResponse =
            serde_json::from_str(r#"{"playlists":[{"id":"p1","name":"One"}]}"#).unwrap();
        assert_eq!(wrapped.into_vec().len(), 1);

        let bare: PlaylistsResponse =
            serde_json::from_str(r#"[{"id":"p1","name":"One"},{"id":"p2","name":"Two"}]"#)
                .unwrap();
        assert_eq!(bare.into_vec().len(), 2);
    }

    #[test]
    fn test_developer_token_alias() {
        let t: DeveloperToken = serde_json::from_str(r#"{"developerToken":"abc"}"#).unwrap();
        assert_eq!(t.token, "abc");
    }
}
