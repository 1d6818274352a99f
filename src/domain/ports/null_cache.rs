//! Null cache implementation.
//!
//! Used when caching is disabled but the type system requires a
//! KeyValueCache implementation.

use async_trait::async_trait;
use std::time::Duration;

use super::key_value_cache::{CacheResult, KeyValueCache};

/// A no-op cache that stores nothing, so every lookup misses.
#[derive(Debug, Clone, Default)]
pub struct NullKeyValueCache;

impl NullKeyValueCache {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl KeyValueCache for NullKeyValueCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Option<Duration>) -> CacheResult<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> CacheResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "none"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_cache_always_misses() {
        let cache = NullKeyValueCache::new();
        cache.set("recipes", "[]".to_string(), None).await.unwrap();
        assert!(cache.get("recipes").await.unwrap().is_none());
        cache.delete("recipes").await.unwrap();
    }
}
