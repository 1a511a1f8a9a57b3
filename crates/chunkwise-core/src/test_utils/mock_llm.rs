// src/test_utils/mock_llm.rs
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core_types::{LLMResponse, Message};
use crate::errors::SummaryError;
use crate::llm::LLM;

const PROMPT_PREFIX: &str = "Summarize this document :\n\n";

#[derive(Debug, Clone)]
pub enum MockResponse {
    Text(String),
    TooLarge,
    Error(String),
}

impl MockResponse {
    fn into_result(self) -> Result<LLMResponse, SummaryError> {
        match self {
            MockResponse::Text(text) => Ok(LLMResponse::text(text)),
            MockResponse::TooLarge => Err(SummaryError::RequestTooLarge(
                "API request failed with status 413 Payload Too Large".to_string(),
            )),
            MockResponse::Error(msg) => Err(SummaryError::LLMError(msg)),
        }
    }
}

/// Scripted LLM that replays responses in order and records every request.
#[derive(Clone)]
pub struct MockLLM {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    repeat: Option<MockResponse>,
    requests: Arc<Mutex<Vec<Vec<Message>>>>,
}

impl MockLLM {
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            repeat: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answers every request with the same response.
    pub fn always(response: MockResponse) -> Self {
        Self {
            repeat: Some(response),
            ..Self::new(vec![])
        }
    }

    pub fn histories(&self) -> Vec<Vec<Message>> {
        self.requests.lock().unwrap().clone()
    }

    /// Content of the last message of every request.
    pub fn prompts(&self) -> Vec<String> {
        self.histories()
            .iter()
            .filter_map(|h| h.last().map(|m| m.content.clone()))
            .collect()
    }

    /// Character length of the chunk embedded in each summary prompt.
    pub fn chunk_lengths(&self) -> Vec<usize> {
        self.prompts()
            .iter()
            .filter_map(|p| p.strip_prefix(PROMPT_PREFIX))
            .map(|rest| rest.split('\n').next().unwrap_or_default().chars().count())
            .collect()
    }
}

#[async_trait]
impl LLM for MockLLM {
    async fn generate(&self, messages: Vec<Message>) -> Result<LLMResponse, SummaryError> {
        self.requests.lock().unwrap().push(messages);

        if let Some(response) = &self.repeat {
            return response.clone().into_result();
        }

        match self.responses.lock().unwrap().pop_front() {
            Some(response) => response.into_result(),
            None => Err(SummaryError::LLMError("No more mock responses".to_string())),
        }
    }
}
