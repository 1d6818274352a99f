//! Shared setup for integration tests.

use std::sync::Arc;

use recipes::adapters::cache::{CachedRecipeRepository, ListingCache, MokaKeyValueCache};
use recipes::adapters::sqlite::{create_migrated_test_pool, SqliteRecipeRepository};
use sqlx::SqlitePool;

/// In-memory SQLite pool with the schema applied.
pub async fn setup_test_db() -> SqlitePool {
    create_migrated_test_pool()
        .await
        .expect("failed to create migrated test pool")
}

pub async fn teardown_test_db(pool: SqlitePool) {
    pool.close().await;
}

/// SQLite store behind an in-process listing cache.
pub fn cached_store(
    pool: SqlitePool,
) -> (
    Arc<CachedRecipeRepository<SqliteRecipeRepository>>,
    Arc<MokaKeyValueCache>,
) {
    let backend = Arc::new(MokaKeyValueCache::new());
    let cache = ListingCache::new(backend.clone());
    let store = Arc::new(SqliteRecipeRepository::new(pool));
    (Arc::new(CachedRecipeRepository::new(store, cache)), backend)
}
