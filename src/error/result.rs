//! Result type alias for fetch operations.

use super::network::NetworkError;

/// Type alias for Results produced by transport, loader, and catalog
/// operations.
///
/// # Example
///
/// ```ignore
/// use marquee::error::FetchResult;
///
/// async fn fetch_page(page: u32) -> FetchResult<PageResponse> {
///     // Implementation that may fail with a NetworkError
/// }
/// ```
pub type FetchResult<T> = Result<T, NetworkError>;
