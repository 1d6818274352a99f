//! Recipes HTTP Server.
//!
//! Exposes the recipe collection as a JSON REST API. Listing requests are
//! served through whatever repository the service wraps, so a cached
//! repository gives cache-aside reads without the handlers knowing.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::adapters::cache::ListingCache;
use crate::domain::errors::DomainError;
use crate::domain::models::{Recipe, RecipeDraft, ServerConfig};
use crate::domain::ports::RecipeRepository;
use crate::services::RecipeService;

/// Configuration for the recipes HTTP server.
#[derive(Debug, Clone)]
pub struct RecipesHttpConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to enable CORS.
    pub enable_cors: bool,
}

impl Default for RecipesHttpConfig {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

impl From<&ServerConfig> for RecipesHttpConfig {
    fn from(config: &ServerConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            enable_cors: config.enable_cors,
        }
    }
}

/// Query parameters for tag search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub tag: String,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Plain acknowledgement.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, code: &str, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.to_string(),
        }),
    )
}

fn domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::RecipeNotFound(_) => api_error(StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
        DomainError::ValidationFailed(_) => {
            api_error(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
        }
        DomainError::DatabaseError(_) | DomainError::SerializationError(_) => {
            tracing::error!(error = %err, "recipe store failure");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR", err.to_string())
        }
    }
}

fn bad_input(reason: String) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, "INVALID_INPUT", reason)
}

/// Shared state for the recipes HTTP server.
struct AppState<R: RecipeRepository> {
    service: RecipeService<R>,
    /// Checked by `/health` when present.
    listing_cache: Option<ListingCache>,
}

/// Recipes HTTP Server.
pub struct RecipesHttpServer<R: RecipeRepository + 'static> {
    config: RecipesHttpConfig,
    service: RecipeService<R>,
    listing_cache: Option<ListingCache>,
}

impl<R: RecipeRepository + 'static> RecipesHttpServer<R> {
    pub fn new(service: RecipeService<R>, config: RecipesHttpConfig) -> Self {
        Self {
            config,
            service,
            listing_cache: None,
        }
    }

    /// Report the listing cache backend in `/health`.
    pub fn with_listing_cache(mut self, cache: ListingCache) -> Self {
        self.listing_cache = Some(cache);
        self
    }

    /// Build the router.
    pub fn into_router(self) -> Router {
        let state = Arc::new(AppState {
            service: self.service,
            listing_cache: self.listing_cache,
        });

        let app = Router::new()
            .route("/recipes", get(list_recipes::<R>).post(create_recipe::<R>))
            .route("/recipes/search", get(search_recipes::<R>))
            .route(
                "/recipes/{id}",
                get(get_recipe::<R>)
                    .put(update_recipe::<R>)
                    .delete(delete_recipe::<R>),
            )
            .route("/health", get(health_check::<R>))
            .with_state(state);

        if self.config.enable_cors {
            app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
                .layer(TraceLayer::new_for_http())
        } else {
            app.layer(TraceLayer::new_for_http())
        }
    }

    /// Start the server.
    pub async fn serve(self) -> anyhow::Result<()> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let host = self.config.host.clone();
        let port = self.config.port;
        let router = self.into_router();

        // Hostnames such as "localhost" are resolved here
        let listener = TcpListener::bind((host.as_str(), port)).await?;
        tracing::info!("Recipes HTTP server listening on {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

// Handler functions

async fn health_check<R: RecipeRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<&'static str, ApiError> {
    if let Some(cache) = &state.listing_cache {
        if let Err(e) = cache.ping().await {
            tracing::warn!(backend = cache.backend_name(), error = %e, "health check: cache unreachable");
            return Err(api_error(StatusCode::SERVICE_UNAVAILABLE, "CACHE_UNAVAILABLE", e.to_string()));
        }
    }
    Ok("OK")
}

async fn list_recipes<R: RecipeRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    state.service.list_recipes().await.map(Json).map_err(domain_error)
}

async fn create_recipe<R: RecipeRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    body: Result<Json<RecipeDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Recipe>), ApiError> {
    let Json(draft) = body.map_err(|e| bad_input(e.body_text()))?;

    let recipe = state.service.create_recipe(draft).await.map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

async fn get_recipe<R: RecipeRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Recipe>, ApiError> {
    let Path(id) = id.map_err(|e| bad_input(e.body_text()))?;
    state.service.get_recipe(id).await.map(Json).map_err(domain_error)
}

async fn update_recipe<R: RecipeRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<RecipeDraft>, JsonRejection>,
) -> Result<Json<Recipe>, ApiError> {
    let Path(id) = id.map_err(|e| bad_input(e.body_text()))?;
    let Json(draft) = body.map_err(|e| bad_input(e.body_text()))?;

    state.service.update_recipe(id, draft).await.map(Json).map_err(domain_error)
}

async fn delete_recipe<R: RecipeRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id.map_err(|e| bad_input(e.body_text()))?;
    state.service.delete_recipe(id).await.map_err(domain_error)?;

    Ok(Json(MessageResponse {
        message: "Recipe has been deleted".to_string(),
    }))
}

async fn search_recipes<R: RecipeRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let Query(params) = params.map_err(|e| bad_input(e.body_text()))?;
    state.service.search_by_tag(&params.tag).await.map(Json).map_err(domain_error)
}
