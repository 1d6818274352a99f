//! Listing cache accessor.
//!
//! Holds the serialized full recipe listing under one well-known key. The
//! snapshot is never authoritative: anything unreadable is a miss.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::models::Recipe;
use crate::domain::ports::{CacheResult, KeyValueCache};

/// Default key holding the listing.
pub const DEFAULT_LISTING_KEY: &str = "recipes";

/// Outcome of a listing lookup. A miss is a normal result, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    Hit(Vec<Recipe>),
    Miss,
}

impl CacheLookup {
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }

    pub fn into_hit(self) -> Option<Vec<Recipe>> {
        match self {
            Self::Hit(recipes) => Some(recipes),
            Self::Miss => None,
        }
    }
}

/// Cache accessor for the full recipe listing.
#[derive(Clone)]
pub struct ListingCache {
    backend: Arc<dyn KeyValueCache>,
    key: String,
    ttl: Option<Duration>,
}

impl ListingCache {
    pub fn new(backend: Arc<dyn KeyValueCache>) -> Self {
        Self {
            backend,
            key: DEFAULT_LISTING_KEY.to_string(),
            ttl: None,
        }
    }

    /// Use a different cache key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Expire the listing after `ttl`; `None` keeps it until invalidated.
    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.backend_name()
    }

    /// Check that the backing store is reachable.
    pub async fn ping(&self) -> CacheResult<()> {
        self.backend.ping().await
    }

    /// Return the cached listing when present and decodable.
    ///
    /// Backend failures and undecodable payloads are both reported as a miss
    /// so the caller falls through to the store.
    pub async fn get_listing(&self) -> CacheLookup {
        let payload = match self.backend.get(&self.key).await {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                debug!(key = %self.key, "listing cache miss");
                return CacheLookup::Miss;
            }
            Err(e) => {
                warn!(key = %self.key, backend = self.backend_name(), error = %e, "listing cache read failed, treating as miss");
                return CacheLookup::Miss;
            }
        };

        match serde_json::from_str::<Vec<Recipe>>(&payload) {
            Ok(recipes) => {
                debug!(key = %self.key, count = recipes.len(), "listing cache hit");
                CacheLookup::Hit(recipes)
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "cached listing is not decodable, treating as miss");
                CacheLookup::Miss
            }
        }
    }

    /// Serialize `recipes` and store them under the listing key.
    pub async fn set_listing(&self, recipes: &[Recipe]) -> CacheResult<()> {
        let payload = serde_json::to_string(recipes)?;
        self.backend.set(&self.key, payload, self.ttl).await?;
        debug!(key = %self.key, count = recipes.len(), "listing cache populated");
        Ok(())
    }

    /// Drop the cached listing. Idempotent.
    pub async fn invalidate_listing(&self) -> CacheResult<()> {
        self.backend.delete(&self.key).await?;
        debug!(key = %self.key, "listing cache invalidated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::cache::MokaKeyValueCache;
    use crate::domain::models::RecipeDraft;

    fn listing_cache() -> (Arc<MokaKeyValueCache>, ListingCache) {
        let backend = Arc::new(MokaKeyValueCache::new());
        let cache = ListingCache::new(backend.clone());
        (backend, cache)
    }

    #[tokio::test]
    async fn test_cold_cache_misses() {
        let (_, cache) = listing_cache();
        assert_eq!(cache.get_listing().await, CacheLookup::Miss);
    }

    #[tokio::test]
    async fn test_set_then_get_returns_snapshot() {
        let (_, cache) = listing_cache();
        let recipes = vec![
            Recipe::from_draft(&RecipeDraft::new("Pasta").with_tags(["italian"])),
            Recipe::from_draft(&RecipeDraft::new("Tacos").with_tags(["mexican"])),
        ];

        cache.set_listing(&recipes).await.unwrap();

        assert_eq!(cache.get_listing().await, CacheLookup::Hit(recipes));
    }

    #[tokio::test]
    async fn test_empty_listing_is_a_hit() {
        let (_, cache) = listing_cache();
        cache.set_listing(&[]).await.unwrap();
        assert_eq!(cache.get_listing().await, CacheLookup::Hit(vec![]));
    }

    #[tokio::test]
    async fn test_invalidate_is_idempotent() {
        let (_, cache) = listing_cache();
        cache.set_listing(&[]).await.unwrap();

        cache.invalidate_listing().await.unwrap();
        assert_eq!(cache.get_listing().await, CacheLookup::Miss);

        cache.invalidate_listing().await.unwrap();
        assert_eq!(cache.get_listing().await, CacheLookup::Miss);
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_a_miss() {
        let (backend, cache) = listing_cache();
        backend
            .set(DEFAULT_LISTING_KEY, "{not json".to_string(), None)
            .await
            .unwrap();
        assert_eq!(cache.get_listing().await, CacheLookup::Miss);

        backend
            .set(DEFAULT_LISTING_KEY, r#"[{"name": 42}]"#.to_string(), None)
            .await
            .unwrap();
        assert_eq!(cache.get_listing().await, CacheLookup::Miss);
    }

    #[tokio::test]
    async fn test_custom_key() {
        let (backend, cache) = listing_cache();
        let cache = cache.with_key("recipes:v2");

        cache.set_listing(&[]).await.unwrap();

        assert!(backend.get("recipes:v2").await.unwrap().is_some());
        assert!(backend.get(DEFAULT_LISTING_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ping_reaches_backend() {
        let (_, cache) = listing_cache();
        assert!(cache.ping().await.is_ok());
        assert_eq!(cache.backend_name(), "memory");
    }
}
