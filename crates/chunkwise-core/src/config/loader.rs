//! Configuration loader for YAML files and environment resolution

use crate::config::types::*;
use crate::errors::SummaryError;
use std::env;
use std::path::Path;
use tokio::fs;

/// Configuration loader with environment resolution
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<ChunkwiseConfig, SummaryError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).await.map_err(|e| {
            SummaryError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_str(&content)
    }

    /// Load from `path` when it exists, otherwise start from defaults
    pub async fn from_file_or_default<P: AsRef<Path>>(
        path: P,
    ) -> Result<ChunkwiseConfig, SummaryError> {
        let path = path.as_ref();
        if fs::try_exists(path).await.unwrap_or(false) {
            log::info!("Loading configuration from {}", path.display());
            Self::from_file(path).await
        } else {
            log::debug!("No config file at {}, using defaults", path.display());
            let mut config = ChunkwiseConfig::default();
            Self::resolve_llm_auth(&mut config.llm.auth);
            config.validate()?;
            Ok(config)
        }
    }

    /// Load configuration from a YAML string
    pub fn from_str(content: &str) -> Result<ChunkwiseConfig, SummaryError> {
        let mut config: ChunkwiseConfig = if content.trim().is_empty() {
            ChunkwiseConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| {
                SummaryError::ConfigError(format!("Failed to parse YAML config: {}", e))
            })?
        };

        Self::resolve_llm_auth(&mut config.llm.auth);
        config.validate()?;

        Ok(config)
    }

    /// Fill `api_key` from the environment when it is not given explicitly.
    ///
    /// An explicit key wins, then the variable named by `api_key_env`, then
    /// `OPENAI_API_KEY`. A key that is still missing is reported when the
    /// client is built, not here.
    pub fn resolve_llm_auth(auth: &mut LlmAuth) {
        if auth.api_key.is_some() {
            return;
        }

        let env_var = auth
            .api_key_env
            .as_deref()
            .unwrap_or(DEFAULT_OPENAI_API_KEY_ENV);

        if let Ok(api_key) = env::var(env_var) {
            if !api_key.is_empty() {
                auth.api_key = Some(api_key);
            }
        }
    }
}
