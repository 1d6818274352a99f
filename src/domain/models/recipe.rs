//! Recipe domain model.
//!
//! A recipe is the only entity in the system. Identifiers and publication
//! timestamps are always assigned server-side; clients only ever submit a
//! [`RecipeDraft`] carrying the mutable fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Set once at creation, never changed by updates.
    pub published_at: DateTime<Utc>,
}

impl Recipe {
    /// Materialize a draft as a new record with a fresh identifier.
    pub fn from_draft(draft: &RecipeDraft) -> Self {
        Self::with_id(Uuid::new_v4(), draft)
    }

    /// Materialize a draft under a caller-chosen identifier (upserts).
    pub fn with_id(id: Uuid, draft: &RecipeDraft) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            tags: draft.tags.clone(),
            ingredients: draft.ingredients.clone(),
            instructions: draft.instructions.clone(),
            published_at: Utc::now(),
        }
    }

    /// Replace every mutable field with the draft's values.
    ///
    /// `id` and `published_at` are left untouched.
    pub fn apply(&mut self, draft: &RecipeDraft) {
        self.name.clone_from(&draft.name);
        self.tags.clone_from(&draft.tags);
        self.ingredients.clone_from(&draft.ingredients);
        self.instructions.clone_from(&draft.instructions);
    }

    /// Exact, case-sensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Client-supplied recipe fields.
///
/// Unknown fields (including any `id` or `publishedAt` a client sends) are
/// ignored during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

impl RecipeDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_instructions<I, S>(mut self, instructions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.instructions = instructions.into_iter().map(Into::into).collect();
        self
    }

    /// Check the draft before it reaches a store.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("recipe name cannot be empty".to_string());
        }
        Ok(())
    }
}

impl From<Recipe> for RecipeDraft {
    fn from(recipe: Recipe) -> Self {
        Self {
            name: recipe.name,
            tags: recipe.tags,
            ingredients: recipe.ingredients,
            instructions: recipe.instructions,
        }
    }
}

/// How an update for an unknown identifier is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Report the recipe as not found.
    #[default]
    Strict,
    /// Create the recipe under the requested identifier.
    Upsert,
}

impl UpdateMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Upsert => "upsert",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_uses_camel_case_timestamp() {
        let recipe = Recipe::from_draft(&RecipeDraft::new("Pasta").with_tags(["italian"]));
        let json = serde_json::to_value(&recipe).unwrap();

        assert!(json.get("publishedAt").is_some());
        assert!(json.get("published_at").is_none());
        assert_eq!(json["tags"][0], "italian");
        assert_eq!(json["id"], recipe.id.to_string());
    }

    #[test]
    fn test_draft_ignores_client_identity_fields() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000001",
            "name": "Tacos",
            "publishedAt": "2020-01-01T00:00:00Z",
            "tags": ["mexican"]
        }"#;
        let draft: RecipeDraft = serde_json::from_str(json).unwrap();

        assert_eq!(draft.name, "Tacos");
        assert_eq!(draft.tags, vec!["mexican"]);
        assert!(draft.ingredients.is_empty());
        assert!(draft.instructions.is_empty());
    }

    #[test]
    fn test_apply_keeps_identity() {
        let mut recipe = Recipe::from_draft(&RecipeDraft::new("Soup").with_tags(["winter"]));
        let id = recipe.id;
        let published_at = recipe.published_at;

        recipe.apply(&RecipeDraft::new("Cold soup").with_tags(["summer"]));

        assert_eq!(recipe.id, id);
        assert_eq!(recipe.published_at, published_at);
        assert_eq!(recipe.name, "Cold soup");
        assert_eq!(recipe.tags, vec!["summer"]);
    }

    #[test]
    fn test_has_tag_is_case_sensitive() {
        let recipe = Recipe::from_draft(&RecipeDraft::new("Pizza").with_tags(["Italian"]));
        assert!(recipe.has_tag("Italian"));
        assert!(!recipe.has_tag("italian"));
        assert!(!recipe.has_tag("Ital"));
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        assert!(RecipeDraft::new("   ").validate().is_err());
        assert!(RecipeDraft::new("").validate().is_err());
        assert!(RecipeDraft::new("Bread").validate().is_ok());
    }
}
