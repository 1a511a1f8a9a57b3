//! Configuration types for the summarizer
//!
//! Every section is optional in YAML; missing values fall back to the defaults
//! below, so an absent config file is equivalent to an empty one.

use crate::chunking::{
    ChunkingPlan, DEFAULT_MAX_CHARS_PER_CHUNK, DEFAULT_MAX_TOTAL_CHARS,
    DEFAULT_SUMMARY_TARGET_CHARS,
};
use crate::errors::SummaryError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkwiseConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: LlmProvider,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub parameters: ModelParameters,
    #[serde(default)]
    pub auth: LlmAuth,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            model: default_model(),
            parameters: ModelParameters::default(),
            auth: LlmAuth::default(),
        }
    }
}

/// LLM provider types
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    OpenAI,
    Custom {
        base_url: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelParameters {
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Zero leaves the completion length to the service.
    #[serde(default)]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: 0,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmAuth {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_key_env: Option<String>,
}

/// Chunking limits and the oversize-retry policy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkingConfig {
    #[serde(default = "default_max_total_chars")]
    pub max_total_chars: usize,
    #[serde(default = "default_max_chars_per_chunk")]
    pub max_chars_per_chunk: usize,
    #[serde(default = "default_summary_target_chars")]
    pub summary_target_chars: usize,
    #[serde(default = "default_min_chars_per_chunk")]
    pub min_chars_per_chunk: usize,
    #[serde(default = "default_shrink_factor")]
    pub shrink_factor: f64,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_total_chars: default_max_total_chars(),
            max_chars_per_chunk: default_max_chars_per_chunk(),
            summary_target_chars: default_summary_target_chars(),
            min_chars_per_chunk: default_min_chars_per_chunk(),
            shrink_factor: default_shrink_factor(),
        }
    }
}

impl ChunkingConfig {
    pub fn plan(&self) -> ChunkingPlan {
        ChunkingPlan::new(
            self.max_total_chars,
            self.max_chars_per_chunk,
            self.summary_target_chars,
        )
    }
}

impl ChunkwiseConfig {
    pub fn validate(&self) -> Result<(), SummaryError> {
        if self.llm.model.trim().is_empty() {
            return Err(SummaryError::ConfigError("llm.model must not be empty".to_string()));
        }
        if !(0.0..=2.0).contains(&self.llm.parameters.temperature) {
            return Err(SummaryError::ConfigError(format!(
                "llm.parameters.temperature must be between 0.0 and 2.0, got {}",
                self.llm.parameters.temperature
            )));
        }
        if let LlmProvider::Custom { base_url } = &self.llm.provider {
            if base_url.is_empty() {
                return Err(SummaryError::ConfigError(
                    "Custom provider requires a valid 'base_url'".to_string(),
                ));
            }
        }

        let chunking = &self.chunking;
        if chunking.max_chars_per_chunk == 0 {
            return Err(SummaryError::ConfigError(
                "chunking.max_chars_per_chunk must be greater than zero".to_string(),
            ));
        }
        if chunking.min_chars_per_chunk == 0 {
            return Err(SummaryError::ConfigError(
                "chunking.min_chars_per_chunk must be greater than zero".to_string(),
            ));
        }
        if !(chunking.shrink_factor > 0.0 && chunking.shrink_factor < 1.0) {
            return Err(SummaryError::ConfigError(format!(
                "chunking.shrink_factor must be in (0, 1), got {}",
                chunking.shrink_factor
            )));
        }

        Ok(())
    }
}

fn default_model() -> String { "gpt-3.5-turbo".to_string() }
fn default_temperature() -> f32 { 0.7 }
fn default_timeout_secs() -> u64 { 120 }
fn default_max_total_chars() -> usize { DEFAULT_MAX_TOTAL_CHARS }
fn default_max_chars_per_chunk() -> usize { DEFAULT_MAX_CHARS_PER_CHUNK }
fn default_summary_target_chars() -> usize { DEFAULT_SUMMARY_TARGET_CHARS }
fn default_min_chars_per_chunk() -> usize { 1000 }
fn default_shrink_factor() -> f64 { 0.8 }
