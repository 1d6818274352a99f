//! Cache-aside wrapper for RecipeRepository.
//!
//! Serves `list` from the listing cache and repopulates it on a miss. All
//! successful writes invalidate the listing. Invalidation is best-effort:
//! a failure is logged and the write still reports success.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use super::listing_cache::{CacheLookup, ListingCache};
use crate::domain::errors::DomainResult;
use crate::domain::models::{Recipe, RecipeDraft, UpdateMode};
use crate::domain::ports::RecipeRepository;

/// Cached recipe repository decorator.
///
/// Wraps any `RecipeRepository` implementation. Only the full listing is
/// cached; single-recipe and tag lookups go straight to the inner store.
pub struct CachedRecipeRepository<R: RecipeRepository> {
    inner: Arc<R>,
    cache: ListingCache,
    /// Present when concurrent misses are collapsed into one store query.
    fill_lock: Option<Mutex<()>>,
}

impl<R: RecipeRepository> CachedRecipeRepository<R> {
    pub fn new(inner: Arc<R>, cache: ListingCache) -> Self {
        Self {
            inner,
            cache,
            fill_lock: None,
        }
    }

    /// Serialize cache misses so that N concurrent misses issue one store
    /// query; waiters re-check the cache once the first fill completes.
    pub fn with_miss_coalescing(mut self, enabled: bool) -> Self {
        self.fill_lock = enabled.then(|| Mutex::new(()));
        self
    }

    pub fn listing_cache(&self) -> &ListingCache {
        &self.cache
    }

    pub fn inner(&self) -> &Arc<R> {
        &self.inner
    }

    /// Query the store and populate the cache with the result.
    async fn load_and_fill(&self) -> DomainResult<Vec<Recipe>> {
        debug!(key = self.cache.key(), "loading recipe listing from store");
        let recipes = self.inner.list().await?;

        if let Err(e) = self.cache.set_listing(&recipes).await {
            warn!(key = self.cache.key(), error = %e, "failed to populate listing cache");
        }

        Ok(recipes)
    }

    async fn invalidate(&self, operation: &'static str) {
        if let Err(e) = self.cache.invalidate_listing().await {
            warn!(
                key = self.cache.key(),
                operation,
                error = %e,
                "failed to invalidate listing cache, listing may be stale"
            );
        }
    }
}

#[async_trait]
impl<R: RecipeRepository + 'static> RecipeRepository for CachedRecipeRepository<R> {
    async fn list(&self) -> DomainResult<Vec<Recipe>> {
        if let CacheLookup::Hit(recipes) = self.cache.get_listing().await {
            return Ok(recipes);
        }

        let Some(fill_lock) = &self.fill_lock else {
            return self.load_and_fill().await;
        };

        let _guard = fill_lock.lock().await;
        // Another caller may have filled the cache while we waited
        if let CacheLookup::Hit(recipes) = self.cache.get_listing().await {
            return Ok(recipes);
        }
        self.load_and_fill().await
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<Recipe>> {
        self.inner.get(id).await
    }

    async fn create(&self, draft: &RecipeDraft) -> DomainResult<Recipe> {
        let recipe = self.inner.create(draft).await?;
        self.invalidate("create").await;
        Ok(recipe)
    }

    async fn update(&self, id: Uuid, draft: &RecipeDraft, mode: UpdateMode) -> DomainResult<Recipe> {
        let recipe = self.inner.update(id, draft, mode).await?;
        self.invalidate("update").await;
        Ok(recipe)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.inner.delete(id).await?;
        self.invalidate("delete").await;
        Ok(())
    }

    async fn find_by_tag(&self, tag: &str) -> DomainResult<Vec<Recipe>> {
        self.inner.find_by_tag(tag).await
    }
}
