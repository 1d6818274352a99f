//! Implementation of the `recipes init` command.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::adapters::sqlite::{initialize_database, PoolConfig};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::setup::{create_config_dir, create_config_file, SetupPaths};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file with the defaults
    #[arg(long, short)]
    pub force: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct InitOutput {
    pub success: bool,
    pub message: String,
    pub config_file: PathBuf,
    pub config_written: bool,
    pub database_url: Option<String>,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![self.message.clone()];
        if self.config_written {
            lines.push(format!("\nWrote default configuration to {}", self.config_file.display()));
        }
        if let Some(url) = &self.database_url {
            lines.push(format!("Database ready at {url}"));
        }
        lines.join("\n")
    }
}

pub async fn execute(args: InitArgs, config: &Config, json_mode: bool) -> Result<()> {
    let paths = SetupPaths::new()?;

    if paths.is_initialized() && !args.force {
        let output_data = InitOutput {
            success: false,
            message: "Project already initialized. Use --force to rewrite the configuration.".to_string(),
            config_file: paths.config_file,
            config_written: false,
            database_url: None,
        };
        output(&output_data, json_mode);
        return Ok(());
    }

    create_config_dir(&paths)?;
    let config_written = create_config_file(&paths, args.force)?;

    let pool = initialize_database(&config.database.url, Some(PoolConfig::from(&config.database)))
        .await
        .context("Failed to initialize database")?;
    pool.close().await;

    let output_data = InitOutput {
        success: true,
        message: if args.force {
            "Project reinitialized successfully.".to_string()
        } else {
            "Project initialized successfully.".to_string()
        },
        config_file: paths.config_file,
        config_written,
        database_url: Some(config.database.url.clone()),
    };

    output(&output_data, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_output_human() {
        let out = InitOutput {
            success: true,
            message: "Project initialized successfully.".to_string(),
            config_file: PathBuf::from(".recipes/config.yaml"),
            config_written: true,
            database_url: Some("sqlite:.recipes/recipes.db".to_string()),
        };

        let text = out.to_human();
        assert!(text.contains(".recipes/config.yaml"));
        assert!(text.contains("sqlite:.recipes/recipes.db"));
        assert_eq!(out.to_json()["success"], true);
    }
}
