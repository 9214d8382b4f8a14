//! Mock HTTP client for testing.
//!
//! Routes are matched by URL (exact first, then prefix) and optionally by
//! method. A route may hold a queue of responses that are handed out in
//! order; the last one repeats.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body, if any
    pub body: Option<String>,
}

impl RecordedRequest {
    /// Parse the recorded body as JSON.
    pub fn json(&self) -> Option<serde_json::Value> {
        self.body.as_deref().and_then(|b| serde_json::from_str(b).ok())
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response (any status)
    Success(Response),
    /// Return a transport error
    Error(HttpError),
}

impl MockResponse {
    /// A JSON response with the given status.
    pub fn json(status: u16, value: serde_json::Value) -> Self {
        MockResponse::Success(Response::json_body(status, &value))
    }

    /// An empty response with the given status.
    pub fn status(status: u16) -> Self {
        MockResponse::Success(Response::new(status, Bytes::new()))
    }
}

#[derive(Debug)]
struct Route {
    method: Option<String>,
    url: String,
    responses: VecDeque<MockResponse>,
}

/// Mock HTTP client for testing.
///
/// # Example
///
/// ```ignore
/// use playshare::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.set_route("GET", "https://api.test/api/users/me", MockResponse::json(200, json!({...})));
/// // ... exercise code ...
/// assert_eq!(client.get_requests().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    routes: Arc<Mutex<Vec<Route>>>,
    default_response: Arc<Mutex<Option<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to any method on `url`.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        self.insert_route(None, url, vec![response]);
    }

    /// Respond to `method` on `url`.
    pub fn set_route(&self, method: &str, url: &str, response: MockResponse) {
        self.insert_route(Some(method), url, vec![response]);
    }

    /// Respond to `method` on `url` with each response in turn; the last one
    /// repeats once the queue is drained.
    pub fn set_sequence(&self, method: &str, url: &str, responses: Vec<MockResponse>) {
        self.insert_route(Some(method), url, responses);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        *self.default_response.lock().unwrap() = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Recorded requests with the given method whose URL starts with `prefix`.
    pub fn requests_matching(&self, method: &str, prefix: &str) -> Vec<RecordedRequest> {
        self.get_requests()
            .into_iter()
            .filter(|r| r.method == method && r.url.starts_with(prefix))
            .collect()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn insert_route(&self, method: Option<&str>, url: &str, responses: Vec<MockResponse>) {
        let mut routes = self.routes.lock().unwrap();
        let method = method.map(str::to_string);
        routes.retain(|r| !(r.method == method && r.url == url));
        routes.push(Route {
            method,
            url: url.to_string(),
            responses: responses.into(),
        });
    }

    fn record_request(&self, method: &str, url: &str, headers: &Headers, body: Option<String>) {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
        });
    }

    fn next_response(&self, method: &str, url: &str) -> Option<MockResponse> {
        let mut routes = self.routes.lock().unwrap();

        // Exact URL beats prefix, explicit method beats wildcard, longer
        // prefix beats shorter.
        let score = |r: &Route| -> Option<(u8, usize)> {
            let method_ok = r.method.as_deref().map_or(true, |m| m == method);
            if !method_ok {
                return None;
            }
            let method_bonus = u8::from(r.method.is_some());
            if r.url == url {
                Some((2 + method_bonus * 2, r.url.len()))
            } else if url.starts_with(&r.url) {
                Some((method_bonus, r.url.len()))
            } else {
                None
            }
        };

        let best = routes
            .iter()
            .enumerate()
            .filter_map(|(i, r)| score(r).map(|s| (s, i)))
            .max_by_key(|(s, _)| *s)
            .map(|(_, i)| i);

        if let Some(i) = best {
            let route = &mut routes[i];
            return if route.responses.len() > 1 {
                route.responses.pop_front()
            } else {
                route.responses.front().cloned()
            };
        }

        self.default_response.lock().unwrap().clone()
    }

    fn respond(&self, method: &str, url: &str) -> Result<Response, HttpError> {
        match self.next_response(method, url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!(
                "No mock response for {} {}",
                method, url
            ))),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("GET", url, headers, None);
        self.respond("GET", url)
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()));
        self.respond("POST", url)
    }

    async fn put(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("PUT", url, headers, Some(body.to_string()));
        self.respond("PUT", url)
    }

    async fn delete(
        &self,
        url: &str,
        body: Option<&str>,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        self.record_request("DELETE", url, headers, body.map(str::to_string));
        self.respond("DELETE", url)
    }
}
