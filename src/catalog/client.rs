//! Catalog API client.
//!
//! Typed client for the paginated popular-titles feed. Builds addresses via
//! [`endpoints`], authenticates with a bearer key, classifies non-2xx
//! statuses into [`NetworkError`] variants, and decodes JSON pages.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::adapters::ReqwestHttpClient;
use crate::error::{FetchResult, NetworkError};
use crate::models::PageResponse;
use crate::traits::{Headers, HttpClient};

use super::endpoints::{self, CATALOG_BASE_URL, DEFAULT_LANGUAGE};

/// Client for the catalog backend API.
#[derive(Clone)]
pub struct CatalogClient {
    base_url: String,
    language: String,
    api_key: String,
    http: Arc<dyn HttpClient>,
}

impl CatalogClient {
    /// Create a client against the production catalog host.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(CATALOG_BASE_URL, api_key)
    }

    /// Create a client against a custom host.
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            api_key: api_key.into(),
            http: Arc::new(ReqwestHttpClient::new()),
        }
    }

    /// Replace the transport, e.g. with a mock for tests.
    pub fn with_http_client(mut self, http: Arc<dyn HttpClient>) -> Self {
        self.http = http;
        self
    }

    /// Override the language/region selector sent with every request.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Fetch one page of the popular-titles feed.
    pub async fn fetch_popular(&self, page: u32) -> FetchResult<PageResponse> {
        let url = endpoints::popular(&self.base_url, &self.language, page);
        debug!(%url, "requesting catalog page");

        let response = self.http.get(&url, &self.headers()).await?;
        if let Some(err) = NetworkError::from_status(response.status) {
            warn!(
                page,
                status = response.status,
                code = err.error_code(),
                "catalog page fetch failed"
            );
            return Err(err);
        }

        response.json().map_err(|e| NetworkError::Decode {
            message: e.to_string(),
        })
    }

    fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.api_key),
        );
        headers.insert("accept".to_string(), "application/json".to_string());
        headers
    }
}
