//! Deduplicating, cache-backed resource loader.
//!
//! Orchestrates "get resource by key": a cache hit short-circuits; a cache
//! miss triggers at most one in-flight fetch per key, and concurrent callers
//! for the same key all await the same shared outcome. The component has no
//! pagination or ordering semantics: it is a pure key-addressed, coalesced,
//! cached fetch primitive, reusable for any decodable resource.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use tokio::sync::oneshot;
use tracing::{debug, trace, warn};

use crate::cache::ResourceCache;
use crate::error::{FetchResult, NetworkError};
use crate::traits::{Headers, HttpClient};

pub mod poster;

pub use poster::{shared_poster_loader, PosterLoader, POSTER_CACHE_MAX_ENTRIES};

/// The in-flight request handle shared by all coalesced callers of one key.
///
/// Backed by a oneshot channel filled in by the fetch task; `Shared` hands
/// every clone the same resolved outcome.
type InFlight<V> = Shared<BoxFuture<'static, FetchResult<Arc<V>>>>;

/// Decodes fetched bytes into the resource value.
type Decoder<V> = Arc<dyn Fn(Bytes) -> FetchResult<V> + Send + Sync>;

/// Coalescing loader for resources addressed by URL string.
///
/// The resource key is the full fetchable address; equality is exact string
/// equality. Successful fetches populate a bounded recency cache; failed or
/// cancelled fetches never do, so a later call for the same key retries.
///
/// # Example
///
/// ```ignore
/// use marquee::loader::ResourceLoader;
///
/// let loader = ResourceLoader::new(http, 64, |bytes| {
///     serde_json::from_slice(&bytes)
///         .map_err(|e| NetworkError::Decode { message: e.to_string() })
/// });
/// let value = loader.load("https://example.com/resource").await?;
/// ```
pub struct ResourceLoader<V> {
    inner: Arc<LoaderInner<V>>,
}

struct LoaderInner<V> {
    cache: ResourceCache<V>,
    in_flight: Mutex<HashMap<String, InFlight<V>>>,
    http: Arc<dyn HttpClient>,
    decode: Decoder<V>,
}

impl<V: Send + Sync + 'static> ResourceLoader<V> {
    /// Create a loader over the given transport with a bounded cache.
    pub fn new(
        http: Arc<dyn HttpClient>,
        capacity: usize,
        decode: impl Fn(Bytes) -> FetchResult<V> + Send + Sync + 'static,
    ) -> Self {
        Self {
            inner: Arc::new(LoaderInner {
                cache: ResourceCache::new(capacity),
                in_flight: Mutex::new(HashMap::new()),
                http,
                decode: Arc::new(decode),
            }),
        }
    }

    /// Load the resource for `key`, coalescing with any fetch already in
    /// flight for the same key.
    ///
    /// All callers awaiting one in-flight fetch observe the same outcome.
    /// Joining never cancels the underlying fetch, and dropping a waiter
    /// drops only its handle on the shared result.
    pub async fn load(&self, key: &str) -> FetchResult<Arc<V>> {
        if let Some(value) = self.inner.cache.get(key) {
            trace!(key, "resource cache hit");
            return Ok(value);
        }

        let shared = {
            let mut in_flight = self.inner.in_flight.lock().unwrap();
            if let Some(existing) = in_flight.get(key) {
                debug!(key, "joining in-flight fetch");
                existing.clone()
            } else {
                let (tx, rx) = oneshot::channel();
                let shared: InFlight<V> = async move {
                    match rx.await {
                        Ok(outcome) => outcome,
                        // Sender dropped without delivering: the fetch task
                        // terminated before completion
                        Err(_) => Err(NetworkError::Cancelled),
                    }
                }
                .boxed()
                .shared();
                in_flight.insert(key.to_string(), shared.clone());
                self.spawn_fetch(key.to_string(), tx);
                shared
            }
        };

        shared.await
    }

    /// Number of fetches currently registered as in flight.
    pub fn in_flight_len(&self) -> usize {
        self.inner.in_flight.lock().unwrap().len()
    }

    /// Cache statistics (hits, misses).
    pub fn cache_stats(&self) -> (u64, u64) {
        self.inner.cache.stats()
    }

    /// Number of decoded resources currently cached.
    pub fn cached_len(&self) -> usize {
        self.inner.cache.len()
    }

    fn spawn_fetch(&self, key: String, tx: oneshot::Sender<FetchResult<Arc<V>>>) {
        let http = Arc::clone(&self.inner.http);
        let decode = Arc::clone(&self.inner.decode);
        let weak = Arc::downgrade(&self.inner);

        tokio::spawn(async move {
            let result = fetch_resource(http.as_ref(), &decode, &key).await;

            // The completion path must not keep the loader alive; if it was
            // dropped mid-fetch there is no cache or registry left to update.
            let Some(inner) = weak.upgrade() else {
                let _ = tx.send(result);
                return;
            };

            if let Ok(value) = &result {
                inner.cache.put(&key, Arc::clone(value));
            }
            // Deliver before unregistering: a caller racing with removal
            // either joins this already-resolved future or starts fresh
            // against a populated cache.
            let _ = tx.send(result);
            inner.in_flight.lock().unwrap().remove(&key);
        });
    }
}

async fn fetch_resource<V>(
    http: &dyn HttpClient,
    decode: &Decoder<V>,
    key: &str,
) -> FetchResult<Arc<V>> {
    let response = http.get(key, &Headers::new()).await?;
    if let Some(err) = NetworkError::from_status(response.status) {
        warn!(key, status = response.status, "resource fetch failed");
        return Err(err);
    }
    (decode.as_ref())(response.body).map(Arc::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::traits::Response;
    use std::time::Duration;

    fn utf8_loader(http: &MockHttpClient, capacity: usize) -> ResourceLoader<String> {
        ResourceLoader::new(Arc::new(http.clone()), capacity, |bytes| {
            String::from_utf8(bytes.to_vec()).map_err(|e| NetworkError::Decode {
                message: e.to_string(),
            })
        })
    }

    async fn wait_for_registry_drain(loader: &ResourceLoader<String>) {
        for _ in 0..200 {
            if loader.in_flight_len() == 0 {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!("in-flight registry never drained");
    }

    #[tokio::test]
    async fn test_concurrent_loads_coalesce_to_one_fetch() {
        let http = MockHttpClient::new();
        http.set_response(
            "https://img.test/a.jpg",
            MockResponse::Success(Response::new(200, Bytes::from("decoded-a"))),
        );
        http.set_delay(Duration::from_millis(20));

        let loader = utf8_loader(&http, 8);
        let (a, b, c) = tokio::join!(
            loader.load("https://img.test/a.jpg"),
            loader.load("https://img.test/a.jpg"),
            loader.load("https://img.test/a.jpg"),
        );

        assert_eq!(http.request_count(), 1);
        let (a, b, c) = (a.unwrap(), b.unwrap(), c.unwrap());
        assert_eq!(*a, "decoded-a");
        // All waiters share the same decoded allocation
        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&b, &c));
    }

    #[tokio::test]
    async fn test_distinct_keys_fetch_independently() {
        let http = MockHttpClient::new();
        http.set_response(
            "https://img.test/a.jpg",
            MockResponse::Success(Response::new(200, Bytes::from("a"))),
        );
        http.set_response(
            "https://img.test/b.jpg",
            MockResponse::Success(Response::new(200, Bytes::from("b"))),
        );

        let loader = utf8_loader(&http, 8);
        let (a, b) = tokio::join!(
            loader.load("https://img.test/a.jpg"),
            loader.load("https://img.test/b.jpg"),
        );

        assert_eq!(http.request_count(), 2);
        assert_eq!(*a.unwrap(), "a");
        assert_eq!(*b.unwrap(), "b");
    }

    #[tokio::test]
    async fn test_second_load_hits_cache_without_transport() {
        let http = MockHttpClient::new();
        http.set_response(
            "https://img.test/a.jpg",
            MockResponse::Success(Response::new(200, Bytes::from("a"))),
        );

        let loader = utf8_loader(&http, 8);
        let first = loader.load("https://img.test/a.jpg").await.unwrap();
        let second = loader.load("https://img.test/a.jpg").await.unwrap();

        assert_eq!(http.request_count(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        let (hits, _) = loader.cache_stats();
        assert_eq!(hits, 1);
    }

    #[tokio::test]
    async fn test_failure_shared_by_all_waiters_and_not_cached() {
        let http = MockHttpClient::new();
        http.set_response(
            "https://img.test/broken.jpg",
            MockResponse::Success(Response::new(500, Bytes::new())),
        );
        http.set_delay(Duration::from_millis(10));

        let loader = utf8_loader(&http, 8);
        let (a, b) = tokio::join!(
            loader.load("https://img.test/broken.jpg"),
            loader.load("https://img.test/broken.jpg"),
        );

        assert_eq!(http.request_count(), 1);
        assert_eq!(a.unwrap_err(), NetworkError::ServerError { status: 500 });
        assert_eq!(b.unwrap_err(), NetworkError::ServerError { status: 500 });
        assert_eq!(loader.cached_len(), 0);

        // A later call is a fresh attempt, not a poisoned entry
        let retry = loader.load("https://img.test/broken.jpg").await;
        assert!(retry.is_err());
        assert_eq!(http.request_count(), 2);
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let http = MockHttpClient::new();
        http.set_response(
            "https://img.test/offline.jpg",
            MockResponse::Error(NetworkError::Unavailable {
                message: "connection refused".to_string(),
            }),
        );

        let loader = utf8_loader(&http, 8);
        let result = loader.load("https://img.test/offline.jpg").await;
        assert!(matches!(
            result,
            Err(NetworkError::Unavailable { .. })
        ));
        assert_eq!(loader.cached_len(), 0);
    }

    #[tokio::test]
    async fn test_decode_failure_not_cached() {
        let http = MockHttpClient::new();
        http.set_response(
            "https://img.test/garbage.jpg",
            MockResponse::Success(Response::new(200, Bytes::from(vec![0xff, 0xfe, 0x00]))),
        );

        let loader = utf8_loader(&http, 8);
        let result = loader.load("https://img.test/garbage.jpg").await;
        assert!(matches!(result, Err(NetworkError::Decode { .. })));
        assert_eq!(loader.cached_len(), 0);
    }

    #[tokio::test]
    async fn test_registry_drains_after_completion() {
        let http = MockHttpClient::new();
        http.set_response(
            "https://img.test/a.jpg",
            MockResponse::Success(Response::new(200, Bytes::from("a"))),
        );

        let loader = utf8_loader(&http, 8);
        let _ = loader.load("https://img.test/a.jpg").await.unwrap();
        wait_for_registry_drain(&loader).await;

        // Failed fetches unregister too
        http.set_response(
            "https://img.test/b.jpg",
            MockResponse::Error(NetworkError::NoResponse),
        );
        let _ = loader.load("https://img.test/b.jpg").await;
        wait_for_registry_drain(&loader).await;
    }

    #[tokio::test]
    async fn test_eviction_triggers_refetch() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Success(Response::new(
            200,
            Bytes::from("value"),
        )));

        let loader = utf8_loader(&http, 1);
        let _ = loader.load("https://img.test/a.jpg").await.unwrap();
        let _ = loader.load("https://img.test/b.jpg").await.unwrap();
        // "a" was evicted by "b"; loading it again goes back to transport
        let _ = loader.load("https://img.test/a.jpg").await.unwrap();

        assert_eq!(http.request_count(), 3);
    }
}
