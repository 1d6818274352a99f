//! Service layer coordinating domain rules over the repository ports.

pub mod recipe_service;

pub use recipe_service::RecipeService;
