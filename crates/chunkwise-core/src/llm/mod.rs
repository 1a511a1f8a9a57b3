//! Language model completion abstraction.
//!
//! Summarization only needs two call shapes: an isolated single-prompt
//! completion per chunk, and a conversational completion over the full history
//! for follow-up questions. Both go through the `LLM` trait so any provider can
//! be swapped in without touching orchestration logic. Providers classify
//! oversize-input failures as `SummaryError::RequestTooLarge`.

pub use crate::core_types::{LLMResponse, Message};
use crate::errors::SummaryError;
use async_trait::async_trait;

pub mod prompts;
pub mod providers;
pub mod utils;

pub use utils::LLMFactory;

#[async_trait]
pub trait LLM: Send + Sync {
    /// Conversational completion: returns the next assistant turn for `messages`.
    async fn generate(&self, messages: Vec<Message>) -> Result<LLMResponse, SummaryError>;

    /// Single-prompt completion, independent of any conversation history.
    async fn complete(&self, prompt: &str) -> Result<LLMResponse, SummaryError> {
        self.generate(vec![Message::user(prompt)]).await
    }
}

/// Extracts the generated text, treating an empty choice as a parsing failure.
pub fn response_text(response: LLMResponse) -> Result<String, SummaryError> {
    response
        .content
        .ok_or_else(|| SummaryError::ParsingError("Completion returned no content".to_string()))
}
