//! In-process key-value cache backed by moka.
//!
//! Each entry carries its own TTL so a single cache instance can hold
//! entries with and without expiry.

use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;
use std::time::{Duration, Instant};

use crate::domain::ports::{CacheResult, KeyValueCache};

/// Default maximum number of entries.
const DEFAULT_MAX_CAPACITY: u64 = 64;

#[derive(Clone)]
struct CachedValue {
    value: String,
    ttl: Option<Duration>,
}

/// Expiry policy reading the TTL stored alongside each value.
struct PerEntryTtl;

impl Expiry<String, CachedValue> for PerEntryTtl {
    fn expire_after_create(&self, _key: &String, value: &CachedValue, _created_at: Instant) -> Option<Duration> {
        value.ttl
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.ttl
    }
}

/// moka-backed [`KeyValueCache`]. Contents are local to the process.
#[derive(Clone)]
pub struct MokaKeyValueCache {
    entries: Cache<String, CachedValue>,
}

impl MokaKeyValueCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_CAPACITY)
    }

    pub fn with_capacity(max_capacity: u64) -> Self {
        let entries = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        Self { entries }
    }
}

impl Default for MokaKeyValueCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueCache for MokaKeyValueCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.entries.get(key).await.map(|cached| cached.value))
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> CacheResult<()> {
        self.entries
            .insert(key.to_string(), CachedValue { value, ttl })
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.entries.invalidate(key).await;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_set_delete() {
        let cache = MokaKeyValueCache::new();

        assert!(cache.get("recipes").await.unwrap().is_none());

        cache.set("recipes", "[]".to_string(), None).await.unwrap();
        assert_eq!(cache.get("recipes").await.unwrap().as_deref(), Some("[]"));

        cache.delete("recipes").await.unwrap();
        assert!(cache.get("recipes").await.unwrap().is_none());

        // absent key
        cache.delete("recipes").await.unwrap();
    }

    #[tokio::test]
    async fn test_entry_expires_after_ttl() {
        let cache = MokaKeyValueCache::new();

        cache
            .set("short", "value".to_string(), Some(Duration::from_millis(50)))
            .await
            .unwrap();
        cache.set("forever", "value".to_string(), None).await.unwrap();

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert!(cache.get("short").await.unwrap().is_none());
        assert!(cache.get("forever").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_overwrite_replaces_value() {
        let cache = MokaKeyValueCache::with_capacity(4);

        cache.set("k", "one".to_string(), None).await.unwrap();
        cache.set("k", "two".to_string(), None).await.unwrap();

        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("two"));
    }
}
