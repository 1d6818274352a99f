//! Infrastructure layer module
//!
//! Configuration loading, logging setup, and the project setup/wiring that
//! assembles adapters into a running service.

pub mod config;
pub mod logging;
pub mod setup;
