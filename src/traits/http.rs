//! HTTP client trait abstraction.
//!
//! Provides a trait-based abstraction for HTTP operations, enabling
//! dependency injection and mocking in tests. The crate performs only GET
//! requests; status interpretation belongs to callers.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

use crate::error::NetworkError;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// HTTP response wrapper.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Bytes) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    /// Create a new response with headers.
    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as a string.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    /// Parse the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Trait for HTTP client operations.
///
/// This trait abstracts the transport layer so the loader and catalog client
/// depend only on "give me bytes for this address". Implementations include
/// the production reqwest-based client and a mock client for testing.
///
/// # Example
///
/// ```ignore
/// use marquee::traits::{Headers, HttpClient};
///
/// async fn fetch_data<C: HttpClient>(client: &C) -> FetchResult<String> {
///     let response = client.get("https://api.example.com/data", &Headers::new()).await?;
///     response.text().map_err(|e| NetworkError::Decode { message: e.to_string() })
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a GET request.
    ///
    /// # Arguments
    /// * `url` - The URL to request
    /// * `headers` - Request headers
    ///
    /// # Returns
    /// The response (any status) or a [`NetworkError`] when no response was
    /// obtained at all.
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, NetworkError>;
}
