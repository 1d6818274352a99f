//! Domain models.

pub mod config;
pub mod recipe;

pub use config::{
    CacheBackend, CacheConfig, Config, DatabaseConfig, LogFormat, LoggingConfig, RecipesConfig,
    RotationPolicy, ServerConfig,
};
pub use recipe::{Recipe, RecipeDraft, UpdateMode};
