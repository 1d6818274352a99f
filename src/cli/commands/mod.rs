//! CLI command implementations.

pub mod init;
pub mod recipe;
pub mod serve;
