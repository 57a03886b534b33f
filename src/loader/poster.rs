//! Poster image loading.
//!
//! Specializes [`ResourceLoader`] for poster images: the key is the full
//! image URL built from a catalog poster path plus a size variant, and the
//! decoded value is an [`image::DynamicImage`]. A process-wide shared loader
//! is available so every rendered item coalesces onto the same cache and
//! in-flight registry.

use std::sync::Arc;

use image::DynamicImage;
use once_cell::sync::Lazy;
use tracing::warn;

use crate::adapters::ReqwestHttpClient;
use crate::catalog::endpoints::{self, PosterSize, IMAGE_BASE_URL};
use crate::error::{FetchResult, NetworkError};
use crate::traits::HttpClient;

use super::ResourceLoader;

/// Maximum number of decoded posters kept in memory.
pub const POSTER_CACHE_MAX_ENTRIES: usize = 128;

/// Coalesced, cached loader for poster images.
///
/// Poster fetch failures are not user-visible errors: callers fall back to a
/// placeholder and may retry later, since a failed attempt never populates
/// the cache.
pub struct PosterLoader {
    loader: ResourceLoader<DynamicImage>,
    base_url: String,
}

impl PosterLoader {
    /// Create a poster loader over the given transport against the
    /// production image host.
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self::with_base_url(http, IMAGE_BASE_URL)
    }

    /// Create a poster loader against a custom image host.
    pub fn with_base_url(http: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            loader: ResourceLoader::new(http, POSTER_CACHE_MAX_ENTRIES, decode_poster),
            base_url: base_url.into(),
        }
    }

    /// Load a poster by its catalog path (e.g. `/abc123.jpg`) and size
    /// variant.
    pub async fn load(
        &self,
        poster_path: &str,
        size: PosterSize,
    ) -> FetchResult<Arc<DynamicImage>> {
        let url = endpoints::poster_url(&self.base_url, size, poster_path);
        self.loader.load(&url).await.map_err(|err| {
            warn!(poster_path, error = %err, "poster load failed");
            err
        })
    }

    /// Cache statistics (hits, misses).
    pub fn cache_stats(&self) -> (u64, u64) {
        self.loader.cache_stats()
    }

    /// Number of decoded posters currently cached.
    pub fn cached_len(&self) -> usize {
        self.loader.cached_len()
    }
}

fn decode_poster(bytes: bytes::Bytes) -> FetchResult<DynamicImage> {
    image::load_from_memory(&bytes).map_err(|e| NetworkError::Decode {
        message: e.to_string(),
    })
}

/// Process-wide poster loader shared by every rendered item.
pub fn shared_poster_loader() -> &'static PosterLoader {
    static SHARED: Lazy<PosterLoader> =
        Lazy::new(|| PosterLoader::new(Arc::new(ReqwestHttpClient::new())));
    &SHARED
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::traits::Response;
    use bytes::Bytes;

    fn tiny_png() -> Vec<u8> {
        let img = image::RgbaImage::new(2, 2);
        let mut buf = std::io::Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, image::ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_poster_valid_png() {
        let decoded = decode_poster(Bytes::from(tiny_png())).unwrap();
        assert_eq!(decoded.width(), 2);
        assert_eq!(decoded.height(), 2);
    }

    #[test]
    fn test_decode_poster_garbage_fails() {
        let result = decode_poster(Bytes::from_static(b"not an image"));
        assert!(matches!(result, Err(NetworkError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_poster_load_caches_decoded_image() {
        let http = MockHttpClient::new();
        http.set_response(
            "https://img.test/w342/poster.jpg",
            MockResponse::Success(Response::new(200, Bytes::from(tiny_png()))),
        );

        let loader = PosterLoader::with_base_url(Arc::new(http.clone()), "https://img.test");
        let first = loader.load("/poster.jpg", PosterSize::W342).await.unwrap();
        let second = loader.load("/poster.jpg", PosterSize::W342).await.unwrap();

        assert_eq!(http.request_count(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.cached_len(), 1);
    }

    #[tokio::test]
    async fn test_poster_sizes_are_distinct_resources() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Success(Response::new(
            200,
            Bytes::from(tiny_png()),
        )));

        let loader = PosterLoader::with_base_url(Arc::new(http.clone()), "https://img.test");
        let _ = loader.load("/poster.jpg", PosterSize::W185).await.unwrap();
        let _ = loader.load("/poster.jpg", PosterSize::W500).await.unwrap();

        assert_eq!(http.request_count(), 2);
        assert_eq!(loader.cached_len(), 2);
    }

    #[tokio::test]
    async fn test_poster_failure_leaves_cache_unpopulated() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Success(Response::new(404, Bytes::new())));

        let loader = PosterLoader::with_base_url(Arc::new(http.clone()), "https://img.test");
        let result = loader.load("/missing.jpg", PosterSize::W342).await;

        assert_eq!(result.unwrap_err(), NetworkError::NotFound);
        assert_eq!(loader.cached_len(), 0);
    }

    #[test]
    fn test_shared_loader_is_a_singleton() {
        let a = shared_poster_loader() as *const PosterLoader;
        let b = shared_poster_loader() as *const PosterLoader;
        assert!(std::ptr::eq(a, b));
    }
}
