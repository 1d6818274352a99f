//! Recipes - a recipe collection service with a cache-aside listing
//!
//! Recipes are stored in SQLite. The full listing is cached under a single
//! key (in-process moka or a shared Redis) and invalidated on every write.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, errors and the repository/cache ports
//! - **Adapters** (`adapters`): SQLite and in-memory stores, cache backends,
//!   the cache-aside repository decorator, and the HTTP API
//! - **Service Layer** (`services`): Validation and write semantics
//! - **Infrastructure Layer** (`infrastructure`): Configuration, logging, wiring
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use recipes::infrastructure::config::ConfigLoader;
//! use recipes::infrastructure::setup::build_service;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = ConfigLoader::load(None)?;
//! let service = build_service(&config).await?;
//! for recipe in service.list_recipes().await? {
//!     println!("{}", recipe.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::cache::{CacheLookup, CachedRecipeRepository, ListingCache};
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{Config, Recipe, RecipeDraft, UpdateMode};
pub use domain::ports::{KeyValueCache, RecipeRepository};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::RecipeService;
