//! Mock implementations for testing.
//!
//! This module provides test doubles for the trait abstractions, enabling
//! unit testing without network dependencies.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses and
//!   recorded requests

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
