//! In-memory store adapters.

pub mod recipe_repository;

pub use recipe_repository::InMemoryRecipeRepository;
