//! Single-flight object cache scoped to one inbound request

use crate::cache::key::CacheKey;
use crate::cache::loader::ObjectLoader;
use crate::error::{LabError, LabResult};
use futures_util::future::{self, BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Outcome of one load, shared by every caller that asks for the same key
type SharedLoad<T> = Shared<BoxFuture<'static, Result<Arc<T>, Arc<LabError>>>>;

/// Per-request cache of backing objects
///
/// A new cache is created for every inbound request and dropped with it, so
/// there is no eviction. The map lock is only held for the check-and-insert;
/// the loader itself runs when the returned future is awaited.
pub struct RequestCache<L: ObjectLoader> {
    loader: Arc<L>,
    entries: Mutex<HashMap<CacheKey, SharedLoad<L::Object>>>,
}

impl<L: ObjectLoader> RequestCache<L> {
    /// Create an empty cache backed by `loader`
    pub fn new(loader: Arc<L>) -> Self {
        Self {
            loader,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Install an already constructed object for `key`
    ///
    /// Overwrites any existing entry. Loads already in flight for the key
    /// keep their own result; only later lookups observe the primed value.
    pub fn prime(&self, key: CacheKey, object: L::Object) {
        let ready: BoxFuture<'static, Result<Arc<L::Object>, Arc<LabError>>> =
            future::ready(Ok(Arc::new(object))).boxed();
        debug!("Priming request cache for {}", key);
        self.entries().insert(key, ready.shared());
    }

    /// Get the object for `key`, loading it at most once per cache
    ///
    /// The lookup happens when this method is called; the loader runs when
    /// the returned future is first polled. Failures are cached as well, so
    /// every caller in the same request sees the same error.
    pub fn load(
        &self,
        key: &CacheKey,
    ) -> impl Future<Output = LabResult<Arc<L::Object>>> + Send + 'static {
        let shared = self.entry(key);
        async move { shared.await.map_err(LabError::Cached) }
    }

    /// Whether an entry (pending or resolved) exists for `key`
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries().contains_key(key)
    }

    /// Number of entries in the cache
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Whether the cache has no entries
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn entry(&self, key: &CacheKey) -> SharedLoad<L::Object> {
        let mut entries = self.entries();
        if let Some(existing) = entries.get(key) {
            debug!("Request cache hit for {}", key);
            return existing.clone();
        }

        debug!("Request cache miss for {}", key);
        let loader = Arc::clone(&self.loader);
        let owned_key = key.clone();
        let pending: BoxFuture<'static, _> = async move {
            loader
                .load(&owned_key)
                .await
                .map(Arc::new)
                .map_err(Arc::new)
        }
        .boxed();

        let shared = pending.shared();
        entries.insert(key.clone(), shared.clone());
        shared
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<CacheKey, SharedLoad<L::Object>>> {
        // The map is never left half-updated, so a poisoned lock is still usable
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingLoader {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingLoader {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: true,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ObjectLoader for CountingLoader {
        type Object = String;

        async fn load(&self, key: &CacheKey) -> LabResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if self.fail {
                Err(LabError::LabBookNotFound(key.to_string()))
            } else {
                Ok(format!("loaded:{}", key.name()))
            }
        }
    }

    fn key(name: &str) -> CacheKey {
        CacheKey::new("alice", "alice", name)
    }

    #[tokio::test]
    async fn concurrent_loads_share_one_loader_call() {
        let loader = CountingLoader::new();
        let cache = RequestCache::new(Arc::clone(&loader));

        let (a, b) = futures_util::join!(cache.load(&key("demo")), cache.load(&key("demo")));

        assert_eq!(a.unwrap().as_str(), "loaded:demo");
        assert_eq!(b.unwrap().as_str(), "loaded:demo");
        assert_eq!(loader.calls(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn loads_across_tasks_are_single_flight() {
        let loader = CountingLoader::new();
        let cache = Arc::new(RequestCache::new(Arc::clone(&loader)));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move { cache.load(&key("demo")).await })
            })
            .collect();

        for handle in handles {
            let value = handle.await.unwrap().unwrap();
            assert_eq!(value.as_str(), "loaded:demo");
        }
        assert_eq!(loader.calls(), 1);
    }

    #[tokio::test]
    async fn distinct_keys_load_separately() {
        let loader = CountingLoader::new();
        let cache = RequestCache::new(Arc::clone(&loader));

        cache.load(&key("one")).await.unwrap();
        cache.load(&key("two")).await.unwrap();
        cache.load(&key("one")).await.unwrap();

        assert_eq!(loader.calls(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn primed_value_skips_loader() {
        let loader = CountingLoader::new();
        let cache = RequestCache::new(Arc::clone(&loader));

        cache.prime(key("demo"), "primed".to_string());
        let value = cache.load(&key("demo")).await.unwrap();

        assert_eq!(value.as_str(), "primed");
        assert_eq!(loader.calls(), 0);
    }

    #[tokio::test]
    async fn prime_overwrites_resolved_entry() {
        let loader = CountingLoader::new();
        let cache = RequestCache::new(Arc::clone(&loader));

        cache.load(&key("demo")).await.unwrap();
        cache.prime(key("demo"), "updated".to_string());

        let value = cache.load(&key("demo")).await.unwrap();
        assert_eq!(value.as_str(), "updated");
        assert_eq!(loader.calls(), 1);
    }

    #[tokio::test]
    async fn prime_does_not_affect_load_in_flight() {
        let loader = CountingLoader::new();
        let cache = RequestCache::new(Arc::clone(&loader));

        let in_flight = cache.load(&key("demo"));
        cache.prime(key("demo"), "primed".to_string());

        assert_eq!(in_flight.await.unwrap().as_str(), "loaded:demo");
        assert_eq!(cache.load(&key("demo")).await.unwrap().as_str(), "primed");
    }

    #[tokio::test]
    async fn failures_are_cached() {
        let loader = CountingLoader::failing();
        let cache = RequestCache::new(Arc::clone(&loader));

        let first = cache.load(&key("broken")).await.unwrap_err();
        let second = cache.load(&key("broken")).await.unwrap_err();

        assert_eq!(loader.calls(), 1);
        assert_eq!(first.kind(), ErrorKind::NotFound);
        match (first, second) {
            (LabError::Cached(a), LabError::Cached(b)) => assert!(Arc::ptr_eq(&a, &b)),
            other => panic!("expected cached errors, got {:?}", other),
        }
    }

    #[test]
    fn new_cache_is_empty() {
        let cache = RequestCache::new(CountingLoader::new());
        assert!(cache.is_empty());
        assert!(!cache.contains(&key("demo")));
    }
}
