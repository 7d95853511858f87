//! Time-bounded snapshot cache
//!
//! Wraps calls to the slow collaborators (tourism API, dataset files) so a
//! fetched snapshot is reused until its freshness window elapses. Entries
//! are keyed by the operation and its arguments and live only in memory.

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Identifies one cached call: the operation and its arguments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    operation: &'static str,
    arguments: String,
}

impl CacheKey {
    pub fn new(operation: &'static str, arguments: impl Into<String>) -> Self {
        Self {
            operation,
            arguments: arguments.into(),
        }
    }
}

struct StoredEntry<T> {
    value: T,
    stored_at: Instant,
}

/// In-memory cache whose entries expire `ttl` after they were stored
pub struct SnapshotCache<T> {
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, StoredEntry<T>>>,
}

impl<T: Clone + Send> SnapshotCache<T> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the fresh value stored under `key`, or run `fetch` and store its result.
    ///
    /// The lock is held while fetching, so concurrent callers asking for the
    /// same snapshot wait for one fetch instead of starting their own.
    #[tracing::instrument(name = "snapshot_cache", level = "debug", skip(self, fetch))]
    pub async fn get_or_fetch<F, Fut>(&self, key: CacheKey, fetch: F) -> T
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = T> + Send,
    {
        let mut entries = self.entries.lock().await;

        match entries.get(&key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                tracing::debug!("Key found and still fresh");
                return entry.value.clone();
            }
            Some(_) => tracing::debug!("Key found but expired"),
            None => tracing::debug!("Key not found"),
        }

        let value = fetch().await;
        entries.insert(
            key,
            StoredEntry {
                value: value.clone(),
                stored_at: Instant::now(),
            },
        );
        value
    }

    /// The stored value if it exists and has not expired
    pub async fn get(&self, key: &CacheKey) -> Option<T> {
        let entries = self.entries.lock().await;
        entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    /// Manually removes a key from the cache.
    pub async fn remove(&self, key: &CacheKey) {
        self.entries.lock().await.remove(key);
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}

impl<T> Debug for SnapshotCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotCache").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}
