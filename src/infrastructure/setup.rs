//! Project setup and runtime wiring
//!
//! Handles project initialization (configuration directory, default config
//! file, database migrations) and assembles the cached recipe service from a
//! loaded [`Config`].

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::adapters::cache::{
    CachedRecipeRepository, ListingCache, MokaKeyValueCache, RedisKeyValueCache,
};
use crate::adapters::sqlite::{initialize_database, PoolConfig, SqliteRecipeRepository};
use crate::domain::models::{CacheBackend, CacheConfig, Config};
use crate::domain::ports::{KeyValueCache, NullKeyValueCache};
use crate::infrastructure::config::CONFIG_DIR;
use crate::services::RecipeService;

/// Default configuration template content
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Recipes service configuration
# Override settings by editing this file, adding .recipes/local.yaml, or
# setting environment variables with the RECIPES_ prefix.
#
# Example environment variables:
#   export RECIPES_SERVER__PORT=9000
#   export RECIPES_CACHE__BACKEND=redis
#   export RECIPES_LOGGING__LEVEL=debug

server:
  host: "127.0.0.1"
  port: 8080
  enable_cors: true

database:
  # SQLite connection URL (project-local by default)
  url: "sqlite:.recipes/recipes.db"
  max_connections: 5

cache:
  # memory, redis or none
  backend: "memory"
  redis_url: "redis://127.0.0.1:6379"
  # Namespace for Redis keys when several deployments share one instance
  key_prefix: ""
  # Key holding the serialized recipe listing
  key: "recipes"
  # Entry lifetime in seconds, 0 keeps entries until the next write
  ttl_secs: 0
  max_capacity: 64
  # Collapse concurrent listing misses into one store query
  coalesce_misses: false

recipes:
  # strict: updating an unknown id is an error; upsert: it creates the recipe
  update_mode: "strict"

logging:
  # trace, debug, info, warn, error
  level: "info"
  # json or pretty
  format: "json"
  # Uncomment to also write rolling JSON log files
  # log_dir: ".recipes/logs"
  rotation: "daily"
"#;

/// The repository stack used by the binary: SQLite behind the listing cache.
pub type AppRepository = CachedRecipeRepository<SqliteRecipeRepository>;

/// Setup paths and directories
#[derive(Debug, Clone)]
pub struct SetupPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
}

impl SetupPaths {
    /// Get setup paths for the current directory
    pub fn new() -> Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Ok(Self::for_root(&current_dir))
    }

    pub fn for_root(root: &Path) -> Self {
        let config_dir = root.join(CONFIG_DIR);
        Self {
            config_file: config_dir.join("config.yaml"),
            config_dir,
        }
    }

    /// Check if the project is already initialized
    pub fn is_initialized(&self) -> bool {
        self.config_file.exists()
    }
}

/// Create the configuration directory
pub fn create_config_dir(paths: &SetupPaths) -> Result<bool> {
    if paths.config_dir.exists() {
        return Ok(false);
    }

    fs::create_dir_all(&paths.config_dir).context("Failed to create config directory")?;
    Ok(true)
}

/// Write the default configuration file, returning whether it was written
pub fn create_config_file(paths: &SetupPaths, force: bool) -> Result<bool> {
    if paths.config_file.exists() && !force {
        return Ok(false);
    }

    fs::write(&paths.config_file, DEFAULT_CONFIG_TEMPLATE).context("Failed to write config file")?;
    Ok(true)
}

/// Build the key-value backend selected by `cache.backend`.
///
/// A Redis connection failure is an error here: the operator asked for a
/// shared cache and silently running without one would hide the problem.
pub async fn build_cache_backend(config: &CacheConfig) -> Result<Arc<dyn KeyValueCache>> {
    let backend: Arc<dyn KeyValueCache> = match config.backend {
        CacheBackend::Memory => Arc::new(MokaKeyValueCache::with_capacity(config.max_capacity)),
        CacheBackend::Redis => Arc::new(
            RedisKeyValueCache::connect(&config.redis_url)
                .await
                .with_context(|| format!("Failed to connect to Redis at {}", config.redis_url))?
                .with_key_prefix(config.key_prefix.clone()),
        ),
        CacheBackend::None => Arc::new(NullKeyValueCache),
    };

    tracing::info!(backend = backend.backend_name(), key = %config.key, "listing cache ready");
    Ok(backend)
}

/// Build the listing cache accessor from configuration.
pub async fn build_listing_cache(config: &CacheConfig) -> Result<ListingCache> {
    let backend = build_cache_backend(config).await?;
    Ok(ListingCache::new(backend)
        .with_key(config.key.clone())
        .with_ttl(config.ttl()))
}

/// Open the database, run migrations and wrap the store with the listing cache.
pub async fn build_repository(config: &Config) -> Result<Arc<AppRepository>> {
    let pool = initialize_database(&config.database.url, Some(PoolConfig::from(&config.database)))
        .await
        .context("Failed to initialize database")?;

    let store = Arc::new(SqliteRecipeRepository::new(pool));
    let cache = build_listing_cache(&config.cache).await?;

    Ok(Arc::new(
        CachedRecipeRepository::new(store, cache).with_miss_coalescing(config.cache.coalesce_misses),
    ))
}

/// Build the recipe service used by both the HTTP server and the CLI.
pub async fn build_service(config: &Config) -> Result<RecipeService<AppRepository>> {
    let repo = build_repository(config).await?;
    Ok(RecipeService::new(repo).with_update_mode(config.recipes.update_mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Recipe, RecipeDraft};
    use crate::domain::ports::RecipeRepository;
    use tempfile::TempDir;

    #[test]
    fn test_default_template_parses_to_defaults() {
        let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        let defaults = Config::default();

        assert_eq!(config.server.port, defaults.server.port);
        assert_eq!(config.database.url, defaults.database.url);
        assert_eq!(config.cache.backend, defaults.cache.backend);
        assert_eq!(config.cache.key, defaults.cache.key);
        assert_eq!(config.cache.key_prefix, defaults.cache.key_prefix);
        assert_eq!(config.recipes.update_mode, defaults.recipes.update_mode);
        assert!(config.logging.log_dir.is_none());
    }

    #[test]
    fn test_create_config_file_respects_force() {
        let dir = TempDir::new().unwrap();
        let paths = SetupPaths::for_root(dir.path());
        assert!(!paths.is_initialized());

        assert!(create_config_dir(&paths).unwrap());
        assert!(create_config_file(&paths, false).unwrap());
        assert!(paths.is_initialized());

        fs::write(&paths.config_file, "server:\n  port: 9000\n").unwrap();
        assert!(!create_config_file(&paths, false).unwrap());
        assert!(fs::read_to_string(&paths.config_file).unwrap().contains("9000"));

        assert!(create_config_file(&paths, true).unwrap());
        assert_eq!(fs::read_to_string(&paths.config_file).unwrap(), DEFAULT_CONFIG_TEMPLATE);
    }

    #[tokio::test]
    async fn test_build_cache_backend_selection() {
        let mut config = CacheConfig::default();
        assert_eq!(build_cache_backend(&config).await.unwrap().backend_name(), "memory");

        config.backend = CacheBackend::None;
        assert_eq!(build_cache_backend(&config).await.unwrap().backend_name(), "none");
    }

    #[tokio::test]
    async fn test_build_repository_caches_listing() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.database.url = format!("sqlite:{}", dir.path().join("recipes.db").display());

        let repo = build_repository(&config).await.unwrap();
        let created: Recipe = repo.create(&RecipeDraft::new("Gazpacho")).await.unwrap();

        let listed = repo.list().await.unwrap();
        assert_eq!(listed, vec![created]);
        assert_eq!(repo.listing_cache().get_listing().await.into_hit(), Some(listed));
    }
}
