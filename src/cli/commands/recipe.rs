//! Recipe commands: `import`, `list`, `show` and `delete`.
//!
//! These go through the same cached repository as the HTTP server, so writes
//! made here invalidate a shared (Redis) listing cache too.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::cli::output::progress::create_import_progress;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{Config, Recipe, RecipeDraft};
use crate::domain::ports::RecipeRepository;
use crate::infrastructure::setup::build_service;
use crate::services::RecipeService;

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON file holding an array of recipes
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show recipes carrying this tag (exact match)
    #[arg(long, short)]
    pub tag: Option<String>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Recipe ID
    pub id: Uuid,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Recipe ID
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct RecipeListOutput {
    pub recipes: Vec<Recipe>,
    pub tag: Option<String>,
}

impl CommandOutput for RecipeListOutput {
    fn to_human(&self) -> String {
        if self.recipes.is_empty() {
            return match &self.tag {
                Some(tag) => format!("No recipes tagged '{tag}'."),
                None => "No recipes found.".to_string(),
            };
        }

        format!(
            "{}\n{} recipe(s)",
            TableFormatter::new().format_recipes(&self.recipes),
            self.recipes.len()
        )
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeOutput {
    pub recipe: Recipe,
}

impl CommandOutput for RecipeOutput {
    fn to_human(&self) -> String {
        TableFormatter::new().format_recipe_detail(&self.recipe)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.recipe).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct ImportOutput {
    pub imported: usize,
    pub source: PathBuf,
    pub recipes: Vec<Recipe>,
}

impl CommandOutput for ImportOutput {
    fn to_human(&self) -> String {
        format!("Imported {} recipe(s) from {}", self.imported, self.source.display())
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteOutput {
    pub id: Uuid,
    pub message: String,
}

impl CommandOutput for DeleteOutput {
    fn to_human(&self) -> String {
        format!("{} ({})", self.message, self.id)
    }
}

/// Read a JSON array of recipes. Any `id` or `publishedAt` in the file is ignored.
pub async fn read_drafts(path: &Path) -> Result<Vec<RecipeDraft>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&content).with_context(|| format!("{} is not a JSON array of recipes", path.display()))
}

pub async fn import<R: RecipeRepository>(
    service: &RecipeService<R>,
    file: &Path,
    show_progress: bool,
) -> Result<ImportOutput> {
    let drafts = read_drafts(file).await?;
    let progress = create_import_progress(drafts.len() as u64, show_progress);

    let result = service.import_recipes_with(drafts, |_| progress.inc(1)).await;
    progress.finish_and_clear();

    let recipes = result.context("Import failed")?;
    Ok(ImportOutput {
        imported: recipes.len(),
        source: file.to_path_buf(),
        recipes,
    })
}

pub async fn list<R: RecipeRepository>(service: &RecipeService<R>, tag: Option<String>) -> Result<RecipeListOutput> {
    let recipes = match &tag {
        Some(tag) => service.search_by_tag(tag).await?,
        None => service.list_recipes().await?,
    };
    Ok(RecipeListOutput { recipes, tag })
}

pub async fn show<R: RecipeRepository>(service: &RecipeService<R>, id: Uuid) -> Result<RecipeOutput> {
    let recipe = service.get_recipe(id).await?;
    Ok(RecipeOutput { recipe })
}

pub async fn delete<R: RecipeRepository>(service: &RecipeService<R>, id: Uuid) -> Result<DeleteOutput> {
    service.delete_recipe(id).await?;
    Ok(DeleteOutput {
        id,
        message: "Recipe has been deleted".to_string(),
    })
}

pub async fn execute_import(args: ImportArgs, config: &Config, json_mode: bool) -> Result<()> {
    let service = build_service(config).await?;
    let result = import(&service, &args.file, !json_mode).await?;
    output(&result, json_mode);
    Ok(())
}

pub async fn execute_list(args: ListArgs, config: &Config, json_mode: bool) -> Result<()> {
    let service = build_service(config).await?;
    output(&list(&service, args.tag).await?, json_mode);
    Ok(())
}

pub async fn execute_show(args: ShowArgs, config: &Config, json_mode: bool) -> Result<()> {
    let service = build_service(config).await?;
    output(&show(&service, args.id).await?, json_mode);
    Ok(())
}

pub async fn execute_delete(args: DeleteArgs, config: &Config, json_mode: bool) -> Result<()> {
    let service = build_service(config).await?;
    output(&delete(&service, args.id).await?, json_mode);
    Ok(())
}
