//! Network error taxonomy.
//!
//! This module defines the single error type used across transport, the
//! resource loader, and the catalog client, along with classification
//! helpers for HTTP status codes and reqwest errors.

use thiserror::Error;

/// Network-specific error variants.
///
/// Every fallible network operation in the crate resolves to one of these.
/// The type is `Clone` so a single fetch outcome can be delivered to every
/// caller coalesced onto the same in-flight request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// The address could not be parsed or built into a request.
    #[error("invalid URL '{url}'")]
    InvalidUrl { url: String },

    /// The request never reached the server (connect, DNS, timeout).
    #[error("network unavailable: {message}")]
    Unavailable { message: String },

    /// The server connection produced no usable response.
    #[error("no response from server")]
    NoResponse,

    /// The response body could not be decoded (JSON or image bytes).
    #[error("failed to decode response: {message}")]
    Decode { message: String },

    /// HTTP 400.
    #[error("bad request (HTTP 400)")]
    BadRequest,

    /// HTTP 401.
    #[error("unauthorized (HTTP 401)")]
    Unauthorized,

    /// HTTP 403.
    #[error("forbidden (HTTP 403)")]
    Forbidden,

    /// HTTP 404.
    #[error("not found (HTTP 404)")]
    NotFound,

    /// HTTP 5xx, or any status outside the recognized set.
    #[error("server error (HTTP {status})")]
    ServerError { status: u16 },

    /// The request was cancelled before completing.
    ///
    /// Never surfaced to a presentation sink; the issuing component absorbs
    /// it.
    #[error("request cancelled")]
    Cancelled,
}

impl NetworkError {
    /// Classify an HTTP status code. Returns `None` for 2xx.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            400 => Some(NetworkError::BadRequest),
            401 => Some(NetworkError::Unauthorized),
            403 => Some(NetworkError::Forbidden),
            404 => Some(NetworkError::NotFound),
            other => Some(NetworkError::ServerError { status: other }),
        }
    }

    /// Check if this error is likely transient and the same request can be
    /// retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::Unavailable { .. } => true,
            NetworkError::NoResponse => true,
            NetworkError::ServerError { .. } => true,
            NetworkError::InvalidUrl { .. } => false,
            NetworkError::Decode { .. } => false,
            NetworkError::BadRequest
            | NetworkError::Unauthorized
            | NetworkError::Forbidden
            | NetworkError::NotFound => false,
            NetworkError::Cancelled => false,
        }
    }

    /// Check if this error maps to an HTTP 4xx response.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            NetworkError::BadRequest
                | NetworkError::Unauthorized
                | NetworkError::Forbidden
                | NetworkError::NotFound
        )
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::InvalidUrl { .. } => {
                "The requested address is invalid. Please try again.".to_string()
            }
            NetworkError::Unavailable { .. } => {
                "Unable to reach the server. Please check your internet connection.".to_string()
            }
            NetworkError::NoResponse => {
                "The server did not respond. Please try again later.".to_string()
            }
            NetworkError::Decode { .. } => {
                "Received an invalid response from the server. Please try again.".to_string()
            }
            NetworkError::BadRequest => "The request was invalid. Please try again.".to_string(),
            NetworkError::Unauthorized => {
                "Authentication required. Please check your API key.".to_string()
            }
            NetworkError::Forbidden => {
                "Access denied. You don't have permission for this resource.".to_string()
            }
            NetworkError::NotFound => "The requested resource was not found.".to_string(),
            NetworkError::ServerError { status } => {
                format!(
                    "The server is experiencing issues (HTTP {}). Please try again later.",
                    status
                )
            }
            NetworkError::Cancelled => "The request was cancelled.".to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::InvalidUrl { .. } => "E_NET_URL",
            NetworkError::Unavailable { .. } => "E_NET_UNAVAILABLE",
            NetworkError::NoResponse => "E_NET_NO_RESPONSE",
            NetworkError::Decode { .. } => "E_NET_DECODE",
            NetworkError::BadRequest => "E_NET_400",
            NetworkError::Unauthorized => "E_NET_401",
            NetworkError::Forbidden => "E_NET_403",
            NetworkError::NotFound => "E_NET_404",
            NetworkError::ServerError { .. } => "E_NET_5XX",
            NetworkError::Cancelled => "E_NET_CANCEL",
        }
    }
}

/// Classify a reqwest error into a NetworkError.
pub fn classify_reqwest_error(err: &reqwest::Error, url: &str) -> NetworkError {
    if err.is_builder() {
        NetworkError::InvalidUrl {
            url: url.to_string(),
        }
    } else if err.is_connect() || err.is_timeout() {
        NetworkError::Unavailable {
            message: err.to_string(),
        }
    } else if err.is_decode() {
        NetworkError::Decode {
            message: err.to_string(),
        }
    } else if err.is_body() {
        NetworkError::NoResponse
    } else {
        NetworkError::Unavailable {
            message: err.to_string(),
        }
    }
}
