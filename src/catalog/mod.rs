//! Catalog domain: typed API client, endpoint construction, and the
//! paginated collection controller.

pub mod client;
pub mod controller;
pub mod endpoints;

pub use client::CatalogClient;
pub use controller::{CollectionSink, PageController, PageState};
pub use endpoints::PosterSize;
