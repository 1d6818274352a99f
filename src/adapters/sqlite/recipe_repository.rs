//! SQLite implementation of the RecipeRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Recipe, RecipeDraft, UpdateMode};
use crate::domain::ports::RecipeRepository;

#[derive(Clone)]
pub struct SqliteRecipeRepository {
    pool: SqlitePool,
}

impl SqliteRecipeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn insert(&self, recipe: &Recipe) -> DomainResult<()> {
        sqlx::query(
            r#"INSERT INTO recipes (id, name, tags, ingredients, instructions, published_at)
               VALUES (?, ?, ?, ?, ?, ?)"#
        )
        .bind(recipe.id.to_string())
        .bind(&recipe.name)
        .bind(serde_json::to_string(&recipe.tags)?)
        .bind(serde_json::to_string(&recipe.ingredients)?)
        .bind(serde_json::to_string(&recipe.instructions)?)
        .bind(recipe.published_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl RecipeRepository for SqliteRecipeRepository {
    async fn list(&self) -> DomainResult<Vec<Recipe>> {
        let rows: Vec<RecipeRow> = sqlx::query_as(
            "SELECT * FROM recipes ORDER BY published_at, id"
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<Recipe>> {
        let row: Option<RecipeRow> = sqlx::query_as("SELECT * FROM recipes WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn create(&self, draft: &RecipeDraft) -> DomainResult<Recipe> {
        let recipe = Recipe::from_draft(draft);
        self.insert(&recipe).await?;
        Ok(recipe)
    }

    async fn update(&self, id: Uuid, draft: &RecipeDraft, mode: UpdateMode) -> DomainResult<Recipe> {
        let tags_json = serde_json::to_string(&draft.tags)?;
        let ingredients_json = serde_json::to_string(&draft.ingredients)?;
        let instructions_json = serde_json::to_string(&draft.instructions)?;

        let row: Option<RecipeRow> = match mode {
            UpdateMode::Strict => {
                sqlx::query_as(
                    r#"UPDATE recipes SET name = ?, tags = ?, ingredients = ?, instructions = ?
                       WHERE id = ?
                       RETURNING *"#
                )
                .bind(&draft.name)
                .bind(&tags_json)
                .bind(&ingredients_json)
                .bind(&instructions_json)
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await?
            }
            UpdateMode::Upsert => {
                // published_at only takes effect when the row is inserted
                sqlx::query_as(
                    r#"INSERT INTO recipes (id, name, tags, ingredients, instructions, published_at)
                       VALUES (?, ?, ?, ?, ?, ?)
                       ON CONFLICT(id) DO UPDATE SET
                           name = excluded.name,
                           tags = excluded.tags,
                           ingredients = excluded.ingredients,
                           instructions = excluded.instructions
                       RETURNING *"#
                )
                .bind(id.to_string())
                .bind(&draft.name)
                .bind(&tags_json)
                .bind(&ingredients_json)
                .bind(&instructions_json)
                .bind(chrono::Utc::now().to_rfc3339())
                .fetch_optional(&self.pool)
                .await?
            }
        };

        row.ok_or(DomainError::RecipeNotFound(id))?.try_into()
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RecipeNotFound(id));
        }

        Ok(())
    }

    async fn find_by_tag(&self, tag: &str) -> DomainResult<Vec<Recipe>> {
        let rows: Vec<RecipeRow> = sqlx::query_as(
            r#"SELECT r.* FROM recipes r
               WHERE EXISTS (SELECT 1 FROM json_each(r.tags) WHERE json_each.value = ?)
               ORDER BY r.published_at, r.id"#
        )
        .bind(tag)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}

#[derive(sqlx::FromRow)]
struct RecipeRow {
    id: String,
    name: String,
    tags: String,
    ingredients: String,
    instructions: String,
    published_at: String,
}

impl TryFrom<RecipeRow> for Recipe {
    type Error = DomainError;

    fn try_from(row: RecipeRow) -> Result<Self, Self::Error> {
        Ok(Recipe {
            id: super::parse_uuid(&row.id)?,
            name: row.name,
            tags: super::parse_string_list(&row.tags)?,
            ingredients: super::parse_string_list(&row.ingredients)?,
            instructions: super::parse_string_list(&row.instructions)?,
            published_at: super::parse_datetime(&row.published_at)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;

    async fn setup_test_repo() -> SqliteRecipeRepository {
        let pool = create_migrated_test_pool().await.unwrap();
        SqliteRecipeRepository::new(pool)
    }

    fn pasta() -> RecipeDraft {
        RecipeDraft::new("Pasta")
            .with_tags(["italian", "quick"])
            .with_ingredients(["spaghetti", "garlic", "olive oil"])
            .with_instructions(["boil", "toss"])
    }

    #[tokio::test]
    async fn test_create_and_get_recipe() {
        let repo = setup_test_repo().await;

        let created = repo.create(&pasta()).await.unwrap();
        assert!(!created.id.is_nil());

        let retrieved = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(retrieved, created);
    }

    #[tokio::test]
    async fn test_get_missing_recipe() {
        let repo = setup_test_repo().await;
        assert!(repo.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_returns_every_recipe() {
        let repo = setup_test_repo().await;

        let a = repo.create(&pasta()).await.unwrap();
        let b = repo.create(&RecipeDraft::new("Tacos").with_tags(["mexican"])).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.contains(&a));
        assert!(all.contains(&b));
    }

    #[tokio::test]
    async fn test_strict_update_replaces_fields_and_keeps_timestamp() {
        let repo = setup_test_repo().await;
        let created = repo.create(&pasta()).await.unwrap();

        let draft = RecipeDraft::new("Pasta al limone").with_tags(["italian"]);
        let updated = repo.update(created.id, &draft, UpdateMode::Strict).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.published_at, created.published_at);
        assert_eq!(updated.name, "Pasta al limone");
        assert_eq!(updated.tags, vec!["italian"]);
        assert!(updated.ingredients.is_empty());
        assert_eq!(repo.get(created.id).await.unwrap().unwrap(), updated);
    }

    #[tokio::test]
    async fn test_strict_update_missing_recipe() {
        let repo = setup_test_repo().await;
        let id = Uuid::new_v4();

        let err = repo.update(id, &pasta(), UpdateMode::Strict).await.unwrap_err();
        assert!(matches!(err, DomainError::RecipeNotFound(missing) if missing == id));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_creates_then_updates() {
        let repo = setup_test_repo().await;
        let id = Uuid::new_v4();

        let inserted = repo.update(id, &pasta(), UpdateMode::Upsert).await.unwrap();
        assert_eq!(inserted.id, id);

        let updated = repo
            .update(id, &RecipeDraft::new("Renamed"), UpdateMode::Upsert)
            .await
            .unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.published_at, inserted.published_at);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_twice_reports_not_found() {
        let repo = setup_test_repo().await;
        let created = repo.create(&pasta()).await.unwrap();

        repo.delete(created.id).await.unwrap();
        assert!(repo.get(created.id).await.unwrap().is_none());

        let err = repo.delete(created.id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_find_by_tag_exact_match() {
        let repo = setup_test_repo().await;

        let pasta = repo.create(&pasta()).await.unwrap();
        let pizza = repo
            .create(&RecipeDraft::new("Pizza").with_tags(["Italian", "oven"]))
            .await
            .unwrap();
        repo.create(&RecipeDraft::new("Plain rice")).await.unwrap();

        let italian = repo.find_by_tag("italian").await.unwrap();
        assert_eq!(italian, vec![pasta]);

        let capitalized = repo.find_by_tag("Italian").await.unwrap();
        assert_eq!(capitalized, vec![pizza]);

        assert!(repo.find_by_tag("ital").await.unwrap().is_empty());
        assert!(repo.find_by_tag("mexican").await.unwrap().is_empty());
    }
}
