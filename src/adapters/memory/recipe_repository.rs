//! In-memory implementation of the RecipeRepository.
//!
//! Keeps recipes in a vector behind an async lock. Nothing survives a
//! restart; useful for tests and throwaway servers.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Recipe, RecipeDraft, UpdateMode};
use crate::domain::ports::RecipeRepository;

#[derive(Clone, Default)]
pub struct InMemoryRecipeRepository {
    recipes: Arc<RwLock<Vec<Recipe>>>,
}

impl InMemoryRecipeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn list(&self) -> DomainResult<Vec<Recipe>> {
        Ok(self.recipes.read().await.clone())
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<Recipe>> {
        Ok(self.recipes.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn create(&self, draft: &RecipeDraft) -> DomainResult<Recipe> {
        let recipe = Recipe::from_draft(draft);
        self.recipes.write().await.push(recipe.clone());
        Ok(recipe)
    }

    async fn update(&self, id: Uuid, draft: &RecipeDraft, mode: UpdateMode) -> DomainResult<Recipe> {
        let mut recipes = self.recipes.write().await;

        if let Some(existing) = recipes.iter_mut().find(|r| r.id == id) {
            existing.apply(draft);
            return Ok(existing.clone());
        }

        match mode {
            UpdateMode::Strict => Err(DomainError::RecipeNotFound(id)),
            UpdateMode::Upsert => {
                let recipe = Recipe::with_id(id, draft);
                recipes.push(recipe.clone());
                Ok(recipe)
            }
        }
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let mut recipes = self.recipes.write().await;
        let index = recipes
            .iter()
            .position(|r| r.id == id)
            .ok_or(DomainError::RecipeNotFound(id))?;
        recipes.remove(index);
        Ok(())
    }

    async fn find_by_tag(&self, tag: &str) -> DomainResult<Vec<Recipe>> {
        Ok(self
            .recipes
            .read()
            .await
            .iter()
            .filter(|r| r.has_tag(tag))
            .cloned()
            .collect())
    }
}
