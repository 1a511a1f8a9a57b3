//! Configuration module for the summarizer
//!
//! Supports YAML configuration files with environment-resolved credentials.
//! Everything has a default, so running without a file is valid.

pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;

#[cfg(test)]
mod tests;

use crate::errors::SummaryError;
use std::path::Path;

/// Load a configuration from a YAML file
pub async fn load_config<P: AsRef<Path>>(path: P) -> Result<ChunkwiseConfig, SummaryError> {
    ConfigLoader::from_file(path).await
}

/// Validate a configuration
pub fn validate_config(config: &ChunkwiseConfig) -> Result<(), SummaryError> {
    config.validate()
}
