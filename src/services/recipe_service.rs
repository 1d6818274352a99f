//! Recipe service implementing business logic.

use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Recipe, RecipeDraft, UpdateMode};
use crate::domain::ports::RecipeRepository;

pub struct RecipeService<R: RecipeRepository> {
    repo: Arc<R>,
    update_mode: UpdateMode,
}

impl<R: RecipeRepository> Clone for RecipeService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            update_mode: self.update_mode,
        }
    }
}

impl<R: RecipeRepository> RecipeService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            update_mode: UpdateMode::default(),
        }
    }

    /// Set how updates for unknown IDs are handled.
    pub fn with_update_mode(mut self, mode: UpdateMode) -> Self {
        self.update_mode = mode;
        self
    }

    pub fn update_mode(&self) -> UpdateMode {
        self.update_mode
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repo
    }

    pub async fn list_recipes(&self) -> DomainResult<Vec<Recipe>> {
        self.repo.list().await
    }

    pub async fn get_recipe(&self, id: Uuid) -> DomainResult<Recipe> {
        self.repo.get(id).await?.ok_or(DomainError::RecipeNotFound(id))
    }

    pub async fn create_recipe(&self, draft: RecipeDraft) -> DomainResult<Recipe> {
        draft.validate().map_err(DomainError::ValidationFailed)?;

        let recipe = self.repo.create(&draft).await?;
        info!(recipe_id = %recipe.id, name = %recipe.name, "recipe created");
        Ok(recipe)
    }

    pub async fn update_recipe(&self, id: Uuid, draft: RecipeDraft) -> DomainResult<Recipe> {
        draft.validate().map_err(DomainError::ValidationFailed)?;

        let recipe = self.repo.update(id, &draft, self.update_mode).await?;
        info!(recipe_id = %id, mode = self.update_mode.as_str(), "recipe updated");
        Ok(recipe)
    }

    pub async fn delete_recipe(&self, id: Uuid) -> DomainResult<()> {
        self.repo.delete(id).await?;
        info!(recipe_id = %id, "recipe deleted");
        Ok(())
    }

    pub async fn search_by_tag(&self, tag: &str) -> DomainResult<Vec<Recipe>> {
        self.repo.find_by_tag(tag).await
    }

    /// Create every draft in order, stopping at the first failure.
    ///
    /// All drafts are validated before anything is written.
    pub async fn import_recipes(&self, drafts: Vec<RecipeDraft>) -> DomainResult<Vec<Recipe>> {
        self.import_recipes_with(drafts, |_| {}).await
    }

    /// Like [`RecipeService::import_recipes`], calling `on_created` after each write.
    pub async fn import_recipes_with<F>(&self, drafts: Vec<RecipeDraft>, mut on_created: F) -> DomainResult<Vec<Recipe>>
    where
        F: FnMut(&Recipe) + Send,
    {
        for (index, draft) in drafts.iter().enumerate() {
            draft
                .validate()
                .map_err(|reason| DomainError::ValidationFailed(format!("recipe #{}: {reason}", index + 1)))?;
        }

        let total = drafts.len();
        let mut imported = Vec::with_capacity(total);
        for draft in &drafts {
            let recipe = match self.repo.create(draft).await {
                Ok(recipe) => recipe,
                Err(err) => {
                    warn!(imported = imported.len(), total, error = %err, "import stopped by store error");
                    return Err(partial_import_error(err, imported.len(), total));
                }
            };
            on_created(&recipe);
            imported.push(recipe);
        }

        info!(count = imported.len(), "recipes imported");
        Ok(imported)
    }
}

/// Records written before the failure stay in the store.
fn partial_import_error(err: DomainError, imported: usize, total: usize) -> DomainError {
    let stopped = |reason: String| format!("import stopped after {imported} of {total} recipes: {reason}");
    match err {
        DomainError::DatabaseError(reason) => DomainError::DatabaseError(stopped(reason)),
        DomainError::SerializationError(reason) => DomainError::SerializationError(stopped(reason)),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRecipeRepository;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store whose `create` fails once `capacity` recipes have been written.
    struct FullRecipeRepository {
        inner: InMemoryRecipeRepository,
        capacity: usize,
        created: AtomicUsize,
    }

    #[async_trait]
    impl RecipeRepository for FullRecipeRepository {
        async fn list(&self) -> DomainResult<Vec<Recipe>> {
            self.inner.list().await
        }

        async fn get(&self, id: Uuid) -> DomainResult<Option<Recipe>> {
            self.inner.get(id).await
        }

        async fn create(&self, draft: &RecipeDraft) -> DomainResult<Recipe> {
            if self.created.fetch_add(1, Ordering::SeqCst) >= self.capacity {
                return Err(DomainError::DatabaseError("database or disk is full".to_string()));
            }
            self.inner.create(draft).await
        }

        async fn update(&self, id: Uuid, draft: &RecipeDraft, mode: UpdateMode) -> DomainResult<Recipe> {
            self.inner.update(id, draft, mode).await
        }

        async fn delete(&self, id: Uuid) -> DomainResult<()> {
            self.inner.delete(id).await
        }

        async fn find_by_tag(&self, tag: &str) -> DomainResult<Vec<Recipe>> {
            self.inner.find_by_tag(tag).await
        }
    }

    fn service() -> RecipeService<InMemoryRecipeRepository> {
        RecipeService::new(Arc::new(InMemoryRecipeRepository::new()))
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let service = service();
        let err = service.create_recipe(RecipeDraft::new(" ")).await.unwrap_err();
        assert!(matches!(err, DomainError::ValidationFailed(_)));
        assert!(service.list_recipes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_recipe_is_not_found() {
        let err = service().get_recipe(Uuid::new_v4()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_follows_configured_mode() {
        let strict = service();
        let id = Uuid::new_v4();
        assert!(strict
            .update_recipe(id, RecipeDraft::new("Flan"))
            .await
            .unwrap_err()
            .is_not_found());

        let upsert = service().with_update_mode(UpdateMode::Upsert);
        let recipe = upsert.update_recipe(id, RecipeDraft::new("Flan")).await.unwrap();
        assert_eq!(recipe.id, id);
        assert_eq!(upsert.get_recipe(id).await.unwrap(), recipe);
    }

    #[tokio::test]
    async fn test_import_validates_before_writing() {
        let service = service();
        let drafts = vec![RecipeDraft::new("Pancakes"), RecipeDraft::new("")];

        let err = service.import_recipes(drafts).await.unwrap_err();
        match err {
            DomainError::ValidationFailed(msg) => assert!(msg.contains("#2")),
            other => panic!("Expected ValidationFailed, got {other:?}"),
        }
        assert!(service.list_recipes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_import_assigns_fresh_ids() {
        let service = service();
        let imported = service
            .import_recipes(vec![RecipeDraft::new("Waffles"), RecipeDraft::new("Crepes")])
            .await
            .unwrap();

        assert_eq!(imported.len(), 2);
        assert_ne!(imported[0].id, imported[1].id);
        assert_eq!(service.list_recipes().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_import_reports_each_created_recipe() {
        let service = service();
        let mut seen = Vec::new();

        let imported = service
            .import_recipes_with(vec![RecipeDraft::new("Soup"), RecipeDraft::new("Salad")], |r| {
                seen.push(r.name.clone());
            })
            .await
            .unwrap();

        assert_eq!(imported.len(), 2);
        assert_eq!(seen, vec!["Soup", "Salad"]);
    }

    #[tokio::test]
    async fn test_import_store_error_reports_progress() {
        let repo = Arc::new(FullRecipeRepository {
            inner: InMemoryRecipeRepository::new(),
            capacity: 2,
            created: AtomicUsize::new(0),
        });
        let service = RecipeService::new(Arc::clone(&repo));
        let drafts = vec![RecipeDraft::new("Soup"), RecipeDraft::new("Salad"), RecipeDraft::new("Stew")];

        let err = service.import_recipes(drafts).await.unwrap_err();

        match err {
            DomainError::DatabaseError(msg) => {
                assert!(msg.contains("after 2 of 3 recipes"), "{msg}");
                assert!(msg.contains("database or disk is full"), "{msg}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }
}
