//! Error handling for marquee.
//!
//! The crate deals with a single failure domain: fetching things over the
//! network. [`NetworkError`] covers the full taxonomy (address construction,
//! unreachable server, missing response, decode failures, classified HTTP
//! statuses, and cancellation) and every component reports through it.
//!
//! # Example
//!
//! ```ignore
//! use marquee::error::{FetchResult, NetworkError};
//!
//! match client.fetch_popular(1).await {
//!     Ok(page) => println!("{} items", page.results.len()),
//!     Err(err) => {
//!         eprintln!("[{}] {}", err.error_code(), err.user_message());
//!         if err.is_retryable() {
//!             // same page can be requested again
//!         }
//!     }
//! }
//! ```

mod network;
mod result;

pub use network::{classify_reqwest_error, NetworkError};
pub use result::FetchResult;
