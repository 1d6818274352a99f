//! CLI type definitions
//!
//! Clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::init::InitArgs;
use super::commands::recipe::{DeleteArgs, ImportArgs, ListArgs, ShowArgs};
use super::commands::serve::ServeArgs;

#[derive(Parser, Debug)]
#[command(name = "recipes")]
#[command(about = "Recipes - recipe collection service with a cached listing", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to .recipes/config.yaml)
    #[arg(short, long, global = true, env = "RECIPES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the default configuration and create the database
    Init(InitArgs),

    /// Run the HTTP API
    Serve(ServeArgs),

    /// Bulk-create recipes from a JSON file
    Import(ImportArgs),

    /// List recipes
    List(ListArgs),

    /// Show a single recipe
    Show(ShowArgs),

    /// Delete a recipe
    Delete(DeleteArgs),
}
