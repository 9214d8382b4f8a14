//! Request construction, status classification and decoding shared by every
//! endpoint group.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{classify_status, ApiError, ApiResult};
use crate::models::{Comment, Post};
use crate::session::{Session, SessionManager};
use crate::traits::{Headers, HttpClient, Response, SecureStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Whether a request carries the session token.
pub(crate) enum Auth {
    /// Sign-in and health check.
    Anonymous,
    Bearer(String),
}

/// Typed client for the playshare backend.
///
/// Cloning is cheap; clones share the transport and the session.
pub struct ApiClient<H, S> {
    config: ClientConfig,
    http: Arc<H>,
    session: Arc<SessionManager<S>>,
}

impl<H, S> Clone for ApiClient<H, S> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            http: Arc::clone(&self.http),
            session: Arc::clone(&self.session),
        }
    }
}

impl<H: HttpClient, S: SecureStore> ApiClient<H, S> {
    pub fn new(config: ClientConfig, http: H, session: SessionManager<S>) -> Self {
        Self::with_shared(config, Arc::new(http), Arc::new(session))
    }

    /// Build a client over a transport and session shared with other owners.
    pub fn with_shared(
        config: ClientConfig,
        http: Arc<H>,
        session: Arc<SessionManager<S>>,
    ) -> Self {
        Self {
            config,
            http,
            session,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn http(&self) -> &H {
        &self.http
    }

    /// The session manager; subscribe to it for lifecycle transitions.
    pub fn session(&self) -> &SessionManager<S> {
        &self.session
    }

    /// The stored session, or [`ApiError::AuthenticationMissing`] before
    /// any network I/O.
    pub(crate) async fn require_session(&self) -> ApiResult<Session> {
        self.session.require_session().await
    }

    /// Bearer auth for the stored session.
    pub(crate) async fn bearer(&self) -> ApiResult<(Session, Auth)> {
        let session = self.require_session().await?;
        let auth = Auth::Bearer(session.token.clone());
        Ok((session, auth))
    }

    /// Bearer auth from the token alone, for the who-am-I call made before
    /// the user id is known.
    pub(crate) async fn token_only(&self) -> ApiResult<Auth> {
        self.session
            .store()
            .token()
            .await?
            .map(Auth::Bearer)
            .ok_or(ApiError::AuthenticationMissing)
    }

    /// Perform one request and classify the response.
    ///
    /// A 401 on a request that carried a token invalidates the session
    /// before the error is returned.
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        auth: &Auth,
        limit: Duration,
    ) -> ApiResult<Response> {
        let url = self.config.url(path);
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        if body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        if let Auth::Bearer(token) = auth {
            headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        }

        tracing::debug!("{} {}", method.as_str(), path);
        let call = async {
            match method {
                Method::Get => self.http.get(&url, &headers).await,
                Method::Post => {
                    self.http
                        .post(&url, body.as_deref().unwrap_or("{}"), &headers)
                        .await
                }
                Method::Put => {
                    self.http
                        .put(&url, body.as_deref().unwrap_or("{}"), &headers)
                        .await
                }
                Method::Delete => self.http.delete(&url, body.as_deref(), &headers).await,
            }
        };

        let response = match tokio::time::timeout(limit, call).await {
            Ok(result) => result?,
            Err(_) => {
                tracing::warn!("{} {} timed out after {:?}", method.as_str(), path, limit);
                return Err(ApiError::Timeout {
                    message: format!("no response within {}s", limit.as_secs()),
                });
            }
        };

        if response.is_success() {
            return Ok(response);
        }

        let err = classify_status(response.status, &response.body);
        tracing::debug!(
            "{} {} failed: {} ({})",
            method.as_str(),
            path,
            err,
            err.error_code()
        );
        if matches!(err, ApiError::Unauthorized { .. }) && matches!(auth, Auth::Bearer(_)) {
            self.session.invalidate().await;
        }
        Err(err)
    }

    /// Authenticated request with the default timeout.
    pub(crate) async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        auth: &Auth,
    ) -> ApiResult<Response> {
        self.send(method, path, body, auth, self.config.timeout).await
    }

    /// Authenticated GET decoded as `T`.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        auth: &Auth,
    ) -> ApiResult<T> {
        let response = self.call(Method::Get, path, None, auth).await?;
        decode(&response)
    }

    /// Authenticated request with a JSON body; the response body is decoded
    /// leniently.
    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        auth: &Auth,
    ) -> ApiResult<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_string(body)?;
        let response = self.call(method, path, Some(body), auth).await?;
        Ok(decode_optional(&response))
    }
}

/// Compute `is_owned_by_current_user` on fetched posts.
pub(crate) fn own_posts<'a>(session: &Session, posts: impl IntoIterator<Item = &'a mut Post>) {
    for post in posts {
        post.mark_ownership(session.user_id, &session.username);
    }
}

/// Compute `is_owned_by_current_user` on a comment tree.
pub(crate) fn own_comments(session: &Session, comments: &mut [Comment]) {
    for comment in comments {
        comment.mark_ownership(session.user_id, &session.username);
    }
}

/// Decode a body that must be present.
pub(crate) fn decode<T: DeserializeOwned>(response: &Response) -> ApiResult<T> {
    if response.is_empty() {
        return Err(ApiError::Decode {
            message: format!("empty body (HTTP {})", response.status),
        });
    }
    Ok(response.json()?)
}

/// Decode a mutation response that may be empty or in an unexpected shape.
/// The optimistic value stands when nothing usable comes back.
pub(crate) fn decode_optional<T: DeserializeOwned>(response: &Response) -> Option<T> {
    if response.is_empty() {
        return None;
    }
    match response.json() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("Ignoring unrecognized mutation response: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryStore, MockHttpClient, MockResponse};
    use crate::session::{SessionState, StoreKey};
    use serde_json::json;

    const BASE: &str = "https://api.test";

    fn client(store: InMemoryStore) -> (ApiClient<MockHttpClient, InMemoryStore>, MockHttpClient) {
        let http = MockHttpClient::new();
        let api = ApiClient::new(
            ClientConfig::new().with_base_url(BASE),
            http.clone(),
            SessionManager::new(store),
        );
        (api, http)
    }

    fn signed_in_store() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.insert(StoreKey::JwtToken, "tok");
        store.insert(StoreKey::UserId, "7");
        store.insert(StoreKey::Username, "ana");
        store
    }

    #[tokio::test]
    async fn test_bearer_header_attached() {
        let (api, http) = client(signed_in_store());
        http.set_route("GET", "https://api.test/api/x", MockResponse::json(200, json!({"a": 1})));

        let (_, auth) = api.bearer().await.unwrap();
        let value: serde_json::Value = api.get_json("/api/x", &auth).await.unwrap();

        assert_eq!(value["a"], 1);
        let requests = http.get_requests();
        assert_eq!(
            requests[0].headers.get("Authorization").map(String::as_str),
            Some("Bearer tok")
        );
    }

    #[tokio::test]
    async fn test_missing_session_fails_before_io() {
        let (api, http) = client(InMemoryStore::new());
        let err = api.bearer().await.err().unwrap();
        assert!(matches!(err, ApiError::AuthenticationMissing));
        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_401_invalidates_session() {
        let store = signed_in_store();
        let (api, http) = client(store.clone());
        http.set_default_response(MockResponse::json(401, json!({"message": "jwt expired"})));

        let (_, auth) = api.bearer().await.unwrap();
        let err = api.call(Method::Get, "/api/x", None, &auth).await.unwrap_err();

        assert!(matches!(err, ApiError::Unauthorized { .. }));
        assert!(store.is_empty());
        assert_eq!(api.session().state(), SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_401_on_anonymous_call_leaves_store_alone() {
        let store = signed_in_store();
        let (api, http) = client(store.clone());
        http.set_default_response(MockResponse::status(401));

        let err = api
            .call(Method::Post, "/api/auth/google/signin", Some("{}".into()), &Auth::Anonymous)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Unauthorized { .. }));
        assert!(!store.is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_maps_to_network() {
        let (api, http) = client(signed_in_store());
        http.set_default_response(MockResponse::Error(crate::traits::HttpError::ConnectionFailed(
            "refused".to_string(),
        )));
        let (_, auth) = api.bearer().await.unwrap();
        let err = api.call(Method::Get, "/api/x", None, &auth).await.unwrap_err();
        assert!(matches!(err, ApiError::Network { .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_decode_optional_tolerates_odd_bodies() {
        let empty = Response::new(204, bytes::Bytes::new());
        assert!(decode_optional::<serde_json::Value>(&empty).is_none());

        let text = Response::new(200, bytes::Bytes::from("OK"));
        assert!(decode_optional::<crate::models::VoteResult>(&text).is_none());

        assert!(matches!(decode::<serde_json::Value>(&empty), Err(ApiError::Decode { .. })));
    }
}
