//! Recipe repository port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Recipe, RecipeDraft, UpdateMode};

/// Repository interface for recipe persistence.
///
/// Implementations are the source of truth. Decorators (such as the
/// cache-aside wrapper) implement the same trait.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// List every recipe. Ordering is not part of the contract.
    async fn list(&self) -> DomainResult<Vec<Recipe>>;

    /// Get a recipe by ID.
    async fn get(&self, id: Uuid) -> DomainResult<Option<Recipe>>;

    /// Persist a draft, assigning its identifier and publication time.
    async fn create(&self, draft: &RecipeDraft) -> DomainResult<Recipe>;

    /// Replace all mutable fields of the recipe with the given ID.
    ///
    /// With [`UpdateMode::Strict`] an unknown ID yields `RecipeNotFound`;
    /// with [`UpdateMode::Upsert`] the recipe is created under that ID.
    async fn update(&self, id: Uuid, draft: &RecipeDraft, mode: UpdateMode) -> DomainResult<Recipe>;

    /// Delete the recipe with the given ID.
    async fn delete(&self, id: Uuid) -> DomainResult<()>;

    /// Recipes whose tags contain `tag` exactly (case-sensitive).
    async fn find_by_tag(&self, tag: &str) -> DomainResult<Vec<Recipe>>;
}
