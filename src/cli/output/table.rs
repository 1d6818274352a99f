//! Table output formatting for CLI commands
//!
//! Renders recipes with comfy-table. Colors are dropped when `NO_COLOR` is
//! set or the terminal is dumb.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use super::truncate;
use crate::domain::models::Recipe;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    pub fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format a list of recipes, one row each
    pub fn format_recipes(&self, recipes: &[Recipe]) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Tags").add_attribute(Attribute::Bold),
            Cell::new("Ingredients").add_attribute(Attribute::Bold),
            Cell::new("Published").add_attribute(Attribute::Bold),
        ]);

        for recipe in recipes {
            let id_short = recipe.id.simple().to_string()[..8].to_string();
            let tags = if recipe.tags.is_empty() {
                "-".to_string()
            } else {
                truncate(&recipe.tags.join(", "), 30)
            };

            table.add_row(vec![
                Cell::new(id_short),
                Cell::new(truncate(&recipe.name, 40)),
                self.colored(tags, Color::Cyan),
                Cell::new(recipe.ingredients.len()),
                Cell::new(recipe.published_at.format("%Y-%m-%d %H:%M").to_string()),
            ]);
        }

        table.to_string()
    }

    /// Format a single recipe as a field/value table
    pub fn format_recipe_detail(&self, recipe: &Recipe) -> String {
        let mut table = self.create_base_table();

        table.add_row(vec![field("ID"), Cell::new(recipe.id)]);
        table.add_row(vec![field("Name"), Cell::new(&recipe.name)]);
        table.add_row(vec![field("Tags"), self.colored(recipe.tags.join(", "), Color::Cyan)]);
        table.add_row(vec![field("Ingredients"), Cell::new(bulleted(&recipe.ingredients))]);
        table.add_row(vec![field("Instructions"), Cell::new(numbered(&recipe.instructions))]);
        table.add_row(vec![field("Published"), Cell::new(recipe.published_at.to_rfc3339())]);

        table.to_string()
    }

    fn colored(&self, text: String, color: Color) -> Cell {
        if self.use_colors {
            Cell::new(text).fg(color)
        } else {
            Cell::new(text)
        }
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn field(name: &str) -> Cell {
    Cell::new(name).add_attribute(Attribute::Bold)
}

fn bulleted(items: &[String]) -> String {
    items.iter().map(|item| format!("- {item}")).collect::<Vec<_>>().join("\n")
}

fn numbered(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {item}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

fn supports_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    !matches!(env::var("TERM").as_deref(), Ok("dumb"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::RecipeDraft;

    fn recipe() -> Recipe {
        Recipe::from_draft(
            &RecipeDraft::new("Pasta")
                .with_tags(["italian", "quick"])
                .with_ingredients(["spaghetti", "garlic"])
                .with_instructions(["Boil", "Toss"]),
        )
    }

    #[test]
    fn test_format_recipes() {
        let recipe = recipe();
        let formatter = TableFormatter::with_config(false, Some(120));
        let output = formatter.format_recipes(std::slice::from_ref(&recipe));

        assert!(output.contains("Name"));
        assert!(output.contains("Pasta"));
        assert!(output.contains("italian, quick"));
        assert!(output.contains(&recipe.id.simple().to_string()[..8]));
    }

    #[test]
    fn test_format_recipes_without_tags() {
        let recipe = Recipe::from_draft(&RecipeDraft::new("Toast"));
        let output = TableFormatter::with_config(false, Some(120)).format_recipes(&[recipe]);
        assert!(output.contains(" - "));
    }

    #[test]
    fn test_format_recipe_detail() {
        let output = TableFormatter::with_config(false, Some(120)).format_recipe_detail(&recipe());

        assert!(output.contains("- spaghetti"));
        assert!(output.contains("2. Toss"));
    }

    #[test]
    fn test_bulleted_and_numbered() {
        let items = vec!["a".to_string(), "b".to_string()];
        assert_eq!(bulleted(&items), "- a\n- b");
        assert_eq!(numbered(&items), "1. a\n2. b");
        assert_eq!(numbered(&[]), "");
    }
}
