//! Caching layer for the recipe listing.
//!
//! `ListingCache` reads and writes the serialized listing through any
//! `KeyValueCache` backend (moka in-process, Redis, or none), and
//! `CachedRecipeRepository` wraps a store as a cache-aside decorator.

pub mod cached_recipe_repository;
pub mod listing_cache;
pub mod moka_cache;
pub mod redis_cache;

pub use cached_recipe_repository::CachedRecipeRepository;
pub use listing_cache::{CacheLookup, ListingCache, DEFAULT_LISTING_KEY};
pub use moka_cache::MokaKeyValueCache;
pub use redis_cache::RedisKeyValueCache;
