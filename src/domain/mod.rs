//! Domain layer for the recipes service
//!
//! This module contains the recipe model, configuration model, error
//! taxonomy, and the port traits implemented by adapters.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
