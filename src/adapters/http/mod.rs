//! HTTP server adapters.

pub mod recipes_http;

pub use recipes_http::{ErrorResponse, MessageResponse, RecipesHttpConfig, RecipesHttpServer};
