//! Concrete implementations of trait abstractions.
//!
//! This module provides production-ready adapters implementing the traits
//! defined in `crate::traits`, plus mock counterparts for tests.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//!
//! # Mock Implementations
//!
//! - [`mock::MockHttpClient`] - Configurable HTTP responses

pub mod mock;
pub mod reqwest_http;

pub use mock::MockHttpClient;
pub use reqwest_http::ReqwestHttpClient;
