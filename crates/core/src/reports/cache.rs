//! Report memoization using Moka.
//!
//! Recomputing a report is O(entries), so callers memoize per query. The key
//! embeds the ledger snapshot version: any write to the store bumps the
//! version and old keys simply stop matching, which is the explicit
//! invalidation the pull-based model requires.

use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

/// Default cache capacity (number of reports).
const DEFAULT_CACHE_CAPACITY: u64 = 200;

/// Default time-to-live for cached reports (5 minutes).
const DEFAULT_TTL_SECS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ReportKey {
    query_hash: u64,
    store_version: u64,
}

/// Memoized reports of one type.
///
/// Thread-safe; clones share the underlying cache.
#[derive(Clone)]
pub struct ReportCache<T> {
    cache: Cache<ReportKey, Arc<T>>,
}

impl<T: Send + Sync + 'static> ReportCache<T> {
    /// Creates a cache with default capacity and TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Creates a cache with explicit capacity and TTL.
    #[must_use]
    pub fn with_config(max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();
        Self { cache }
    }

    /// Returns the cached report for `(query, store_version)`, computing and
    /// storing it on a miss.
    pub fn get_or_compute<Q, F>(&self, store_version: u64, query: &Q, compute: F) -> Arc<T>
    where
        Q: Hash,
        F: FnOnce() -> T,
    {
        let mut hasher = DefaultHasher::new();
        query.hash(&mut hasher);
        let key = ReportKey {
            query_hash: hasher.finish(),
            store_version,
        };
        self.cache.get_with(key, || Arc::new(compute()))
    }

    /// Drops every cached report.
    pub fn invalidate_all(&self) {
        tracing::debug!("report cache invalidated");
        self.cache.invalidate_all();
    }

    /// Number of cached reports.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Send + Sync + 'static> Default for ReportCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
