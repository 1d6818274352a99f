//! Redis key-value cache.
//!
//! Shares the cached listing between every process pointed at the same
//! Redis instance, so a write through one server invalidates all of them.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::time::Duration;
use tracing::debug;

use crate::domain::ports::{CacheError, CacheResult, KeyValueCache};

/// Redis-backed [`KeyValueCache`].
#[derive(Clone)]
pub struct RedisKeyValueCache {
    manager: ConnectionManager,
    key_prefix: String,
}

impl RedisKeyValueCache {
    /// Connect to the Redis instance at `url`.
    pub async fn connect(url: &str) -> CacheResult<Self> {
        let client = redis::Client::open(url).map_err(|e| CacheError::Connection(e.to_string()))?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        debug!(url = url, "connected to Redis");
        Ok(Self {
            manager,
            key_prefix: String::new(),
        })
    }

    /// Namespace every key, e.g. `staging:` turns `recipes` into `staging:recipes`.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    fn key(&self, key: &str) -> String {
        prefixed_key(&self.key_prefix, key)
    }
}

fn prefixed_key(prefix: &str, key: &str) -> String {
    format!("{prefix}{key}")
}

/// Seconds for `SET EX`; Redis rejects an expiry of zero.
fn expiry_secs(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

fn backend_error(err: redis::RedisError) -> CacheError {
    if err.is_connection_dropped() || err.is_connection_refusal() || err.is_timeout() {
        CacheError::Connection(err.to_string())
    } else {
        CacheError::Backend(err.to_string())
    }
}

#[async_trait]
impl KeyValueCache for RedisKeyValueCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(self.key(key)).await.map_err(backend_error)?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> CacheResult<()> {
        let mut conn = self.manager.clone();
        match ttl {
            Some(ttl) => conn
                .set_ex::<_, _, ()>(self.key(key), value, expiry_secs(ttl))
                .await
                .map_err(backend_error)?,
            None => conn.set::<_, _, ()>(self.key(key), value).await.map_err(backend_error)?,
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        let mut conn = self.manager.clone();
        conn.del::<_, ()>(self.key(key)).await.map_err(backend_error)?;
        Ok(())
    }

    async fn ping(&self) -> CacheResult<()> {
        let mut conn = self.manager.clone();
        let _pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(backend_error)?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
