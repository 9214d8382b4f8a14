//! The linked music-streaming library.

use crate::error::ApiResult;
use crate::models::music::PlaylistsResponse;
use crate::models::{DeveloperToken, MusicPlaylist, PlaylistDetails};
use crate::traits::{HttpClient, SecureStore};

use super::client::ApiClient;

impl<H: HttpClient, S: SecureStore> ApiClient<H, S> {
    /// Token for initialising the streaming service's SDK.
    pub async fn developer_token(&self) -> ApiResult<DeveloperToken> {
        let (_, auth) = self.bearer().await?;
        self.get_json("/api/apple-music/developer-token", &auth)
            .await
    }

    /// The user's playlists. Errors are surfaced; there is no fallback list.
    pub async fn playlists(&self) -> ApiResult<Vec<MusicPlaylist>> {
        let (_, auth) = self.bearer().await?;
        let resp: PlaylistsResponse = self.get_json("/api/music/playlists", &auth).await?;
        Ok(resp.into_vec())
    }

    pub async fn playlist_details(&self, playlist_id: &str) -> ApiResult<PlaylistDetails> {
        let (_, auth) = self.bearer().await?;
        let path = format!(
            "/api/music/playlist-details?playlistId={}",
            urlencoding::encode(playlist_id)
        );
        self.get_json(&path, &auth).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryStore, MockHttpClient, MockResponse};
    use crate::config::ClientConfig;
    use crate::error::ApiError;
    use crate::session::{SessionManager, StoreKey};
    use serde_json::json;

    fn client() -> (ApiClient<MockHttpClient, InMemoryStore>, MockHttpClient) {
        let store = InMemoryStore::new();
        store.insert(StoreKey::JwtToken, "tok");
        store.insert(StoreKey::UserId, "4");
        let http = MockHttpClient::new();
        let api = ApiClient::new(
            ClientConfig::new().with_base_url("https://api.test"),
            http.clone(),
            SessionManager::new(store),
        );
        (api, http)
    }

    #[tokio::test]
    async fn test_playlists_failure_is_not_masked() {
        let (api, http) = client();
        http.set_default_response(MockResponse::status(502));
        let err = api.playlists().await.unwrap_err();
        assert!(matches!(err, ApiError::Unexpected { status: Some(502), .. }));
    }

    #[tokio::test]
    async fn test_playlist_details_query() {
        let (api, http) = client();
        http.set_default_response(MockResponse::json(
            200,
            json!({"id": "p.1", "name": "Mix", "tracks": [{"name": "A"}]}),
        ));
        let details = api.playlist_details("p.1 x").await.unwrap();
        assert_eq!(details.tracks.len(), 1);
        assert_eq!(
            http.get_requests()[0].url,
            "https://api.test/api/music/playlist-details?playlistId=p.1%20x"
        );
    }
}
