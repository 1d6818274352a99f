//! Implementation of the `recipes serve` command.

use anyhow::Result;
use clap::Args;

use crate::adapters::http::{RecipesHttpConfig, RecipesHttpServer};
use crate::domain::models::Config;
use crate::infrastructure::setup::build_service;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Host to bind to (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides server.port)
    #[arg(long, short)]
    pub port: Option<u16>,
}

impl ServeArgs {
    fn http_config(&self, config: &Config) -> RecipesHttpConfig {
        let mut http = RecipesHttpConfig::from(&config.server);
        if let Some(host) = &self.host {
            http.host.clone_from(host);
        }
        if let Some(port) = self.port {
            http.port = port;
        }
        http
    }
}

pub async fn execute(args: ServeArgs, config: &Config) -> Result<()> {
    let http_config = args.http_config(config);
    let service = build_service(config).await?;

    tracing::info!(
        update_mode = service.update_mode().as_str(),
        cache_backend = config.cache.backend.as_str(),
        "starting recipes server"
    );

    let listing_cache = service.repository().listing_cache().clone();
    RecipesHttpServer::new(service, http_config)
        .with_listing_cache(listing_cache)
        .serve_with_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received, draining connections");
}
