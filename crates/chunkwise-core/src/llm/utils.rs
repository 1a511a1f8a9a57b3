//! Factory helpers for building LLM clients from configuration

use crate::config::LlmConfig;
use crate::errors::SummaryError;
use crate::llm::{providers, LLM};
use std::sync::Arc;

pub struct LLMFactory;

impl LLMFactory {
    /// Builds the configured provider. The credential is checked here, so a
    /// missing key fails before the first completion request is sent.
    pub fn create_llm_with_config(config: &LlmConfig) -> Result<Arc<dyn LLM>, SummaryError> {
        log::debug!(
            "Creating LLM client for provider {:?} with model {}",
            config.provider,
            config.model
        );
        providers::create_llm_client(config)
    }
}
