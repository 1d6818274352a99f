//! Domain errors for the recipes service.

use thiserror::Error;
use uuid::Uuid;

/// Domain-level errors surfaced by stores and services.
///
/// Cache failures have no variant; they never escape the cache-aside layer.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Recipe not found: {0}")]
    RecipeNotFound(Uuid),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DomainError {
    /// Whether this error means "no such record".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecipeNotFound(_))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
