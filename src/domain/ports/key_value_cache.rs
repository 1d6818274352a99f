//! Key-value cache port.
//!
//! The narrow contract every cache backend fulfils: string keys, string
//! values, and a `None` miss sentinel that is not an error.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Cache backend errors.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),

    #[error("Cache backend error: {0}")]
    Backend(String),

    #[error("Cache serialization error: {0}")]
    Serialization(String),
}

pub type CacheResult<T> = Result<T, CacheError>;

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

/// A string key-value store used as a cache.
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    /// Get the value under `key`; `Ok(None)` when absent.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Store `value` under `key`. `ttl = None` means no expiry.
    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> CacheResult<()>;

    /// Remove `key`. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> CacheResult<()> {
        Ok(())
    }

    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;
}
