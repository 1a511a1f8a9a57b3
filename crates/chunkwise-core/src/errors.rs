//! Error types for chunked summarization
//!
//! The taxonomy is intentionally small. Only `RequestTooLarge` carries recovery
//! semantics: the summarizer reacts to it by shrinking the chunk size and
//! starting over. Every other variant is either fatal (`ConfigError`) or a
//! plain completion failure that the caller decides how to surface.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SummaryError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Request too large for the completion service: {0}")]
    RequestTooLarge(String),
    #[error("LLM interaction failed: {0}")]
    LLMError(String),
    #[error("Parsing error: {0}")]
    ParsingError(String),
    #[error("I/O error: {0}")]
    IoError(String),
}

impl SummaryError {
    /// True for the one error kind the summarizer retries with smaller chunks.
    pub fn is_request_too_large(&self) -> bool {
        matches!(self, SummaryError::RequestTooLarge(_))
    }
}

impl From<std::io::Error> for SummaryError {
    fn from(err: std::io::Error) -> Self {
        SummaryError::IoError(err.to_string())
    }
}

impl From<reqwest::Error> for SummaryError {
    fn from(err: reqwest::Error) -> Self {
        SummaryError::LLMError(err.to_string())
    }
}
