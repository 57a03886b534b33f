//! Marquee - networking core for a movie catalog browser
//!
//! Fetches remote paginated list data and poster images while avoiding
//! redundant network work: concurrent requests for the same resource are
//! coalesced into a single in-flight fetch, decoded resources live in a
//! bounded memory cache, and a pagination controller keeps a growing,
//! deduplicated, ordered collection consistent under concurrent and
//! superseded requests.

pub mod adapters;
pub mod cache;
pub mod catalog;
pub mod error;
pub mod loader;
pub mod models;
pub mod traits;
