//! LLM provider implementations
//!
//! Each provider implements the `LLM` trait and maps its service-specific
//! failures onto `SummaryError`, in particular oversize input onto
//! `RequestTooLarge`.

use crate::config::{LlmConfig, LlmProvider};
use crate::errors::SummaryError;
use crate::llm::LLM;
use std::sync::Arc;

pub mod openai;

/// Create an LLM client based on the provider configuration
pub fn create_llm_client(config: &LlmConfig) -> Result<Arc<dyn LLM>, SummaryError> {
    match &config.provider {
        LlmProvider::OpenAI => openai::create_client(config),
        LlmProvider::Custom { base_url } => openai::create_custom_client(config, base_url),
    }
}
