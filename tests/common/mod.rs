//! Common test utilities for integration tests.
//!
//! # Example
//!
//! ```ignore
//! let server = MockServer::start().await;
//! let (api, store) = signed_in_client(&server.uri());
//! ```

#![allow(dead_code)]

use playshare::adapters::{InMemoryStore, ReqwestHttpClient};
use playshare::api::ApiClient;
use playshare::config::ClientConfig;
use playshare::session::{SessionManager, StoreKey};
use serde_json::{json, Value};

pub type TestClient = ApiClient<ReqwestHttpClient, InMemoryStore>;

pub const TEST_TOKEN: &str = "test-token-12345";
pub const TEST_USER_ID: i64 = 42;
pub const TEST_USERNAME: &str = "tester";

/// A store holding a complete session and a few profile fields.
pub fn signed_in_store() -> InMemoryStore {
    let store = InMemoryStore::new();
    store.insert(StoreKey::JwtToken, TEST_TOKEN);
    store.insert(StoreKey::UserId, &TEST_USER_ID.to_string());
    store.insert(StoreKey::Username, TEST_USERNAME);
    store.insert(StoreKey::Name, "Test User");
    store.insert(StoreKey::AppleMusicConnected, "true");
    store.insert(StoreKey::FollowerCount, "3");
    store
}

/// A real reqwest client pointed at `base_url`, over `store`.
pub fn client_with_store(base_url: &str, store: InMemoryStore) -> TestClient {
    let config = ClientConfig::new().with_base_url(base_url).with_page_size(5);
    ApiClient::new(config, ReqwestHttpClient::new(), SessionManager::new(store))
}

/// A signed-in client plus a handle on its store.
pub fn signed_in_client(base_url: &str) -> (TestClient, InMemoryStore) {
    let store = signed_in_store();
    (client_with_store(base_url, store.clone()), store)
}

/// A post as the backend sends it.
pub fn post_json(id: i64, owner: i64) -> Value {
    json!({
        "postId": id,
        "userId": owner,
        "username": format!("user{}", owner),
        "playlistName": format!("Playlist {}", id),
        "tracks": "[{\"name\":\"Track\"}]",
        "categories": ["indie"],
        "netVotes": 0,
        "userVote": 0,
        "isSaved": false
    })
}

/// Posts `ids` as a JSON array.
pub fn posts_json(ids: impl IntoIterator<Item = i64>) -> Value {
    Value::Array(ids.into_iter().map(|id| post_json(id, 7)).collect())
}
