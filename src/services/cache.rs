use crate::models::SearchHit;
use crate::services::search::normalize_query;
use std::sync::Arc;
use std::time::Duration;

/// In-memory cache of semantic search hits
///
/// Keyed by the normalized query. Only the remote hits are cached; they are
/// merged against the catalog again on every request.
#[derive(Clone)]
pub struct SearchCache {
    entries: moka::future::Cache<String, Arc<Vec<SearchHit>>>,
}

impl SearchCache {
    /// Create a new cache holding at most `capacity` queries for `ttl_secs`
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let entries = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { entries }
    }

    pub async fn get(&self, query: &str) -> Option<Arc<Vec<SearchHit>>> {
        let key = CacheKey::search(query);
        let hit = self.entries.get(&key).await;
        if hit.is_some() {
            tracing::trace!("Cache hit: {}", key);
        } else {
            tracing::trace!("Cache miss: {}", key);
        }
        hit
    }

    pub async fn insert(&self, query: &str, hits: Vec<SearchHit>) -> Arc<Vec<SearchHit>> {
        let key = CacheKey::search(query);
        let hits = Arc::new(hits);
        self.entries.insert(key.clone(), hits.clone()).await;
        tracing::trace!("Cache set: {}", key);
        hits
    }

    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
        tracing::debug!("Invalidated search cache");
    }

    pub async fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a search query
    pub fn search(query: &str) -> String {
        format!("search:{}", normalize_query(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits() -> Vec<SearchHit> {
        vec![SearchHit {
            breed: "Beagle".to_string(),
            score: 0.5,
        }]
    }

    #[tokio::test]
    async fn test_cache_set_get() {
        let cache = SearchCache::new(100, 60);

        assert!(cache.get("friendly hound").await.is_none());
        cache.insert("friendly hound", hits()).await;

        let cached = cache.get("  Friendly   HOUND ").await.unwrap();
        assert_eq!(cached.as_slice(), hits().as_slice());
        assert_eq!(cache.entry_count().await, 1);

        cache.invalidate_all();
        assert!(cache.get("friendly hound").await.is_none());
    }

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::search("Calm Dog"), "search:calm dog");
        assert_eq!(CacheKey::search(" calm\t dog\n"), "search:calm dog");
    }
}
