//! Caching layer for search results.
//!
//! Filtering is purely client-side, so once a search has been run every
//! filter change works off the same result set. The cache keeps recent
//! searches around so that going back to a previous route, date or ordering
//! doesn't hit the backend again.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::{debug, trace};

use crate::api::{ApiError, SearchProvider};
use crate::domain::{ResultSet, SearchCriteria};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached searches.
    pub max_capacity: u64,
}

impl CacheConfig {
    /// Create a new cache configuration.
    pub fn new(ttl: Duration, max_capacity: u64) -> Self {
        Self { ttl, max_capacity }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 200,
        }
    }
}

/// Search provider with caching.
///
/// Wraps any [`SearchProvider`] and caches result sets by criteria. Failed
/// searches are not cached.
pub struct CachedSearchClient<P> {
    provider: P,
    results: MokaCache<SearchCriteria, ResultSet>,
}

impl<P: SearchProvider + Sync> CachedSearchClient<P> {
    /// Create a new cached client.
    pub fn new(provider: P, config: &CacheConfig) -> Self {
        let results = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { provider, results }
    }
}

impl<P: SearchProvider + Sync> SearchProvider for CachedSearchClient<P> {
    async fn search(&self, criteria: &SearchCriteria) -> Result<ResultSet, ApiError> {
        if let Some(cached) = self.results.get(criteria).await {
            trace!(from = %criteria.from, to = %criteria.to, date = %criteria.date, "search cache hit");
            return Ok(cached);
        }

        debug!(from = %criteria.from, to = %criteria.to, date = %criteria.date, "search cache miss");
        let results = self.provider.search(criteria).await?;

        self.results.insert(criteria.clone(), results.clone()).await;

        Ok(results)
    }
}
