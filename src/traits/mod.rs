//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP transport (GET with headers)

pub mod http;

pub use http::{Headers, HttpClient, Response};
