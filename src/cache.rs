//! Bounded in-memory resource cache.
//!
//! Caches decoded resources keyed by their address string. Entries are
//! evicted by recency when the capacity bound is exceeded; an evicted key
//! simply misses on the next `get` and gets re-fetched. No TTL is modeled.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Bounded key-value cache with approximate-LRU eviction.
///
/// Thread-safe behind an internal mutex; callers need no external locking.
/// Values are stored as `Arc<V>` so a hit is a pointer clone, never a copy
/// of the decoded resource.
pub struct ResourceCache<V> {
    inner: Mutex<CacheInner<V>>,
}

struct CacheInner<V> {
    /// Cache entries keyed by resource address
    entries: HashMap<String, Arc<V>>,
    /// Recency order for eviction, least recently used first
    recency: Vec<String>,
    /// Maximum number of entries before eviction kicks in
    capacity: usize,
    /// Statistics: cache hits
    hits: u64,
    /// Statistics: cache misses
    misses: u64,
}

impl<V> ResourceCache<V> {
    /// Create a new empty cache bounded to `capacity` entries.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "cache capacity must be at least 1");
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                recency: Vec::new(),
                capacity,
                hits: 0,
                misses: 0,
            }),
        }
    }

    /// Look up a cached value, refreshing its recency on a hit.
    pub fn get(&self, key: &str) -> Option<Arc<V>> {
        let mut inner = self.inner.lock().unwrap();
        match inner.entries.get(key).cloned() {
            Some(value) => {
                inner.hits += 1;
                Self::touch(&mut inner.recency, key);
                Some(value)
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    /// Store or overwrite a value, evicting the least recently used entries
    /// if the capacity bound would be exceeded.
    pub fn put(&self, key: &str, value: Arc<V>) {
        let mut inner = self.inner.lock().unwrap();

        if inner.entries.insert(key.to_string(), value).is_some() {
            // Overwrite: size unchanged, just refresh recency
            Self::touch(&mut inner.recency, key);
            return;
        }

        inner.recency.push(key.to_string());
        while inner.entries.len() > inner.capacity && !inner.recency.is_empty() {
            let oldest = inner.recency.remove(0);
            inner.entries.remove(&oldest);
        }
    }

    /// Get cache statistics (hits, misses).
    pub fn stats(&self) -> (u64, u64) {
        let inner = self.inner.lock().unwrap();
        (inner.hits, inner.misses)
    }

    /// Get the number of entries currently in the cache.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().entries.is_empty()
    }

    /// Clear all entries from the cache.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.entries.clear();
        inner.recency.clear();
        // Don't reset stats - they're useful for debugging
    }

    /// Move a key to the most-recently-used end of the order.
    fn touch(recency: &mut Vec<String>, key: &str) {
        if let Some(pos) = recency.iter().position(|k| k == key) {
            let entry = recency.remove(pos);
            recency.push(entry);
        }
    }
}
