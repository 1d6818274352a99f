//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that infrastructure adapters must implement:
//! - RecipeRepository: source-of-truth persistence for recipes
//! - KeyValueCache: string key-value store backing the listing cache

pub mod key_value_cache;
pub mod null_cache;
pub mod recipe_repository;

pub use key_value_cache::{CacheError, CacheResult, KeyValueCache};
pub use null_cache::NullKeyValueCache;
pub use recipe_repository::RecipeRepository;
