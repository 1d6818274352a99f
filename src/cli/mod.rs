//! Command-line interface.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

use anyhow::Result;

use crate::domain::models::Config;

/// Run a parsed command against the loaded configuration.
pub async fn dispatch(command: Commands, config: &Config, json_mode: bool) -> Result<()> {
    match command {
        Commands::Init(args) => commands::init::execute(args, config, json_mode).await,
        Commands::Serve(args) => commands::serve::execute(args, config).await,
        Commands::Import(args) => commands::recipe::execute_import(args, config, json_mode).await,
        Commands::List(args) => commands::recipe::execute_list(args, config, json_mode).await,
        Commands::Show(args) => commands::recipe::execute_show(args, config, json_mode).await,
        Commands::Delete(args) => commands::recipe::execute_delete(args, config, json_mode).await,
    }
}

/// Report a failed command and exit with status 1.
pub fn handle_error(err: &anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({ "error": format!("{err:#}") });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1)
}
