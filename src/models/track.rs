//! Playlist tracks.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A track inside a posted playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default, alias = "artistName")]
    pub artist: Option<String>,
    #[serde(default, alias = "albumName")]
    pub album: Option<String>,
    #[serde(default)]
    pub artwork_url: Option<String>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

/// The backend stores a post's tracks as a JSON-encoded string, but some
/// endpoints return the decoded array. Accept both, plus `null`.
pub(crate) fn deserialize_tracks<'de, D>(deserializer: D) -> Result<Vec<Track>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<Track>),
        Encoded(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(Raw::List(tracks)) => Ok(tracks),
        Some(Raw::Encoded(s)) if s.trim().is_empty() => Ok(Vec::new()),
        Some(Raw::Encoded(s)) => serde_json::from_str(&s).map_err(serde::de::Error::custom),
    }
}

/// Send tracks in the JSON-encoded string form the backend stores.
pub(crate) fn serialize_tracks<S>(tracks: &[Track], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let encoded = serde_json::to_string(tracks).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&encoded)
}
