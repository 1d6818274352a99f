//! Recipes CLI entry point.

use clap::Parser;

use recipes::cli::{dispatch, handle_error, Cli};
use recipes::infrastructure::config::ConfigLoader;
use recipes::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => handle_error(&err, cli.json),
    };

    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => handle_error(&err, cli.json),
    };

    if let Err(err) = dispatch(cli.command, &config, cli.json).await {
        tracing::error!(error = %format!("{err:#}"), "command failed");
        handle_error(&err, cli.json);
    }
}
