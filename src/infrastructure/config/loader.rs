use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::{CacheBackend, Config};

/// Project-local directory holding configuration and the default database.
pub const CONFIG_DIR: &str = ".recipes";

/// Prefix for environment overrides, e.g. `RECIPES_CACHE__BACKEND=redis`.
const ENV_PREFIX: &str = "RECIPES_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Database URL cannot be empty")]
    EmptyDatabaseUrl,

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Invalid server port: 0")]
    InvalidPort,

    #[error("Cache key cannot be empty")]
    EmptyCacheKey,

    #[error("Redis URL cannot be empty when the redis cache backend is selected")]
    EmptyRedisUrl,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `.recipes/config.yaml`, or `explicit` when given
    /// 3. `.recipes/local.yaml` (optional local overrides)
    /// 4. Environment variables (`RECIPES_*`, `__` separates nested keys)
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        Self::load_from_dir(Path::new("."), explicit)
    }

    /// Same as [`ConfigLoader::load`] with project files resolved under `root`.
    pub fn load_from_dir(root: &Path, explicit: Option<&Path>) -> Result<Config> {
        let config_dir = root.join(CONFIG_DIR);
        let primary = explicit.map_or_else(|| config_dir.join("config.yaml"), Path::to_path_buf);

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(&primary))
            .merge(Yaml::file(config_dir.join("local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, without local or env overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.database.url.trim().is_empty() {
            return Err(ConfigError::EmptyDatabaseUrl);
        }

        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(
                config.database.max_connections,
            ));
        }

        if config.server.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if config.cache.key.is_empty() {
            return Err(ConfigError::EmptyCacheKey);
        }

        if config.cache.backend == CacheBackend::Redis && config.cache.redis_url.trim().is_empty() {
            return Err(ConfigError::EmptyRedisUrl);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }
}
