//! Memoizing resolver decorator.
//!
//! Wraps any [`Resolve`] implementation with a write-through, in-memory
//! cache. Entries never expire; `clear` is the only eviction path.

use super::{Address, Resolve, Resolving};
use dashmap::DashMap;
use std::sync::Arc;

/// Thread-safe caching decorator over a slow resolver.
///
/// A cache hit returns the stored name without touching the inner
/// resolver. A miss awaits the inner resolver for the full lookup
/// duration, stores the result keyed by address, and returns it.
/// Because the inner resolver never fails, a cached entry is always a
/// settled value — unresolvable addresses are cached as themselves and
/// will not be retried until [`CachingResolver::clear`] is called.
///
/// Concurrent misses for the same address may each invoke the inner
/// resolver; all callers receive the same idempotent name and the cache
/// settles on a single entry.
#[derive(Clone)]
pub struct CachingResolver {
    inner: Arc<dyn Resolve>,
    cache: Arc<DashMap<Address, String>>,
}

impl CachingResolver {
    /// Creates an empty cache over the given resolver.
    pub fn new(inner: Arc<dyn Resolve>) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Returns the cached name for an address, if one is present.
    pub fn cached(&self, addr: &str) -> Option<String> {
        self.cache.get(addr).map(|e| e.clone())
    }

    /// Returns true iff the address has already been resolved.
    pub fn has_resolved(&self, addr: &str) -> bool {
        self.cache.contains_key(addr)
    }

    /// Empties the cache. Subsequent lookups for previously-cached
    /// addresses re-invoke the inner resolver.
    pub fn clear(&self) {
        self.cache.clear();
    }

    /// Number of resolved entries.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns true if nothing has been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Resolve for CachingResolver {
    fn resolve(&self, addr: Address) -> Resolving {
        if let Some(name) = self.cached(addr.as_str()) {
            return Box::pin(std::future::ready(name));
        }

        let inner = Arc::clone(&self.inner);
        let cache = Arc::clone(&self.cache);
        Box::pin(async move {
            let name = inner.resolve(addr.clone()).await;
            cache.insert(addr, name.clone());
            name
        })
    }
}

impl std::fmt::Debug for CachingResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachingResolver")
            .field("entries", &self.cache.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Inner resolver that counts how many lookups reach it.
    struct CountingResolver {
        table: HashMap<Address, String>,
        calls: AtomicUsize,
    }

    impl CountingResolver {
        fn new(table: HashMap<Address, String>) -> Self {
            Self {
                table,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Resolve for CountingResolver {
        fn resolve(&self, addr: Address) -> Resolving {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let name = self
                .table
                .get(&addr)
                .cloned()
                .unwrap_or_else(|| addr.as_str().to_string());
            Box::pin(std::future::ready(name))
        }
    }

    fn mapping() -> HashMap<Address, String> {
        HashMap::from([(Address::new("128.34.12.5"), "www.foobar.com".to_string())])
    }

    #[tokio::test]
    async fn test_second_resolve_skips_inner() {
        let inner = Arc::new(CountingResolver::new(mapping()));
        let caching = CachingResolver::new(inner.clone());

        let first = caching.resolve(Address::new("128.34.12.5")).await;
        let second = caching.resolve(Address::new("128.34.12.5")).await;

        assert_eq!(first, "www.foobar.com");
        assert_eq!(second, first);
        assert_eq!(inner.calls(), 1);
    }

    #[tokio::test]
    async fn test_has_resolved_tracks_cache() {
        let inner = Arc::new(CountingResolver::new(mapping()));
        let caching = CachingResolver::new(inner);

        assert!(!caching.has_resolved("128.34.12.5"));
        caching.resolve(Address::new("128.34.12.5")).await;
        assert!(caching.has_resolved("128.34.12.5"));
    }

    #[tokio::test]
    async fn test_unresolvable_is_cached_as_itself() {
        let inner = Arc::new(CountingResolver::new(HashMap::new()));
        let caching = CachingResolver::new(inner.clone());

        let name = caching.resolve(Address::new("99.98.86.84")).await;
        assert_eq!(name, "99.98.86.84");
        assert!(caching.has_resolved("99.98.86.84"));

        // The identity fallback is a settled value, not retried.
        caching.resolve(Address::new("99.98.86.84")).await;
        assert_eq!(inner.calls(), 1);
    }

    #[tokio::test]
    async fn test_clear_resets_state() {
        let inner = Arc::new(CountingResolver::new(mapping()));
        let caching = CachingResolver::new(inner.clone());

        caching.resolve(Address::new("128.34.12.5")).await;
        assert_eq!(caching.len(), 1);

        caching.clear();

        assert!(!caching.has_resolved("128.34.12.5"));
        assert!(caching.is_empty());

        caching.resolve(Address::new("128.34.12.5")).await;
        assert_eq!(inner.calls(), 2);
    }
}
