//! Mock HTTP client for testing.
//!
//! Provides a configurable mock HTTP client that can return predefined
//! responses or errors for testing purposes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::NetworkError;
use crate::traits::{Headers, HttpClient, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful response
    Success(Response),
    /// Return an error
    Error(NetworkError),
}

/// Mock HTTP client for testing.
///
/// This client can be configured to return specific responses for URLs,
/// allowing tests to verify HTTP interactions without network access.
/// An optional per-client delay holds every response open, which makes
/// in-flight coalescing and supersession windows deterministic to test.
///
/// # Example
///
/// ```ignore
/// use marquee::adapters::mock::{MockHttpClient, MockResponse};
/// use marquee::traits::{Headers, HttpClient, Response};
/// use bytes::Bytes;
///
/// let client = MockHttpClient::new();
///
/// client.set_response(
///     "https://api.example.com/data",
///     MockResponse::Success(Response::new(200, Bytes::from("Hello"))),
/// );
///
/// let response = client.get("https://api.example.com/data", &Headers::new()).await?;
/// assert_eq!(response.status, 200);
///
/// let requests = client.get_requests();
/// assert_eq!(requests.len(), 1);
/// assert_eq!(requests[0].url, "https://api.example.com/data");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Configured responses by URL pattern
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    /// Optional artificial latency applied before every response
    delay: Arc<Mutex<Option<Duration>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a specific URL.
    ///
    /// The URL is matched exactly first, then as a prefix.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Hold every response open for the given duration before answering.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests recorded so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    /// Clear all configured responses.
    pub fn clear_responses(&self) {
        self.responses.lock().unwrap().clear();
    }

    /// Record a request.
    fn record_request(&self, url: &str, headers: &Headers) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
        });
    }

    /// Get the response for a URL.
    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();

        // First try exact match
        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        // Then try prefix match (for URL patterns)
        for (pattern, response) in responses.iter() {
            if url.starts_with(pattern) {
                return Some(response.clone());
            }
        }

        // Finally use default
        let default = self.default_response.lock().unwrap();
        default.clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, NetworkError> {
        self.record_request(url, headers);

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match self.get_response(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(NetworkError::InvalidUrl {
                url: format!("no mock response for {}", url),
            }),
        }
    }
}
