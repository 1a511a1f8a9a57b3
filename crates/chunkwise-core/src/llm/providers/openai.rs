use crate::config::LlmConfig;
use crate::core_types::{LLMResponse, Message, Usage};
use crate::errors::SummaryError;
use crate::llm::LLM;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone)]
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    api_base: String,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OpenAIClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_base: DEFAULT_API_BASE.to_string(),
            model,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_api_base(mut self, api_base: String) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, SummaryError> {
        self.client = Client::builder().timeout(timeout).build().map_err(|e| {
            SummaryError::ConfigError(format!("Failed to build HTTP client: {}", e))
        })?;
        Ok(self)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request_body(&self, messages: &[Message]) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": messages,
        });

        if let Some(temp) = self.temperature {
            body["temperature"] = temp.into();
        }

        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = max_tokens.into();
        }

        body
    }

    /// Maps a non-success HTTP response onto the error taxonomy. Oversize
    /// input shows up either as 413 or as a 400 naming the context limit.
    fn classify_failure(status: StatusCode, body: &str) -> SummaryError {
        let message = format!("API request failed with status {}: {}", status, body);

        if status == StatusCode::PAYLOAD_TOO_LARGE {
            return SummaryError::RequestTooLarge(message);
        }

        if status == StatusCode::BAD_REQUEST {
            let lower = body.to_lowercase();
            if lower.contains("context_length_exceeded")
                || lower.contains("maximum context length")
                || lower.contains("context window")
                || lower.contains("request too large")
                || lower.contains("too many tokens")
            {
                return SummaryError::RequestTooLarge(message);
            }
        }

        SummaryError::LLMError(message)
    }

    fn parse_response(&self, response: Value) -> Result<LLMResponse, SummaryError> {
        let choices = response["choices"]
            .as_array()
            .ok_or_else(|| SummaryError::ParsingError("No choices in response".to_string()))?;

        let choice = choices
            .first()
            .ok_or_else(|| SummaryError::ParsingError("Empty choices array".to_string()))?;

        let content = choice["message"]["content"].as_str().map(|s| s.to_string());
        if content.is_none() {
            return Err(SummaryError::ParsingError(
                "Response choice has no message content".to_string(),
            ));
        }

        let finish_reason = choice["finish_reason"].as_str().map(|s| s.to_string());
        let usage = serde_json::from_value::<Usage>(response["usage"].clone()).ok();

        Ok(LLMResponse {
            content,
            finish_reason,
            usage,
        })
    }
}

#[async_trait]
impl LLM for OpenAIClient {
    async fn generate(&self, messages: Vec<Message>) -> Result<LLMResponse, SummaryError> {
        let url = format!("{}/chat/completions", self.api_base);
        let body = self.build_request_body(&messages);

        log::debug!(
            "OpenAI API request to {} ({} messages, model {})",
            url,
            messages.len(),
            self.model
        );

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body);
        if !self.api_key.is_empty() {
            request = request.header("Authorization", format!("Bearer {}", self.api_key));
        }

        let response = request
            .send()
            .await
            .map_err(|e| SummaryError::LLMError(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| SummaryError::LLMError(format!("Failed to read response: {}", e)))?;

        log::debug!("OpenAI API response ({}): {}", status, response_text);

        if !status.is_success() {
            return Err(Self::classify_failure(status, &response_text));
        }

        let response_json: Value = serde_json::from_str(&response_text)
            .map_err(|e| SummaryError::ParsingError(format!("Invalid JSON response: {}", e)))?;

        self.parse_response(response_json)
    }
}

fn configure(mut client: OpenAIClient, config: &LlmConfig) -> Result<OpenAIClient, SummaryError> {
    client = client.with_temperature(config.parameters.temperature);
    if config.parameters.max_tokens > 0 {
        client = client.with_max_tokens(config.parameters.max_tokens);
    }
    if config.parameters.timeout_secs > 0 {
        client = client.with_timeout(Duration::from_secs(config.parameters.timeout_secs))?;
    }
    Ok(client)
}

/// Create an OpenAI LLM client from configuration
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LLM>, SummaryError> {
    let api_key = config.auth.api_key.clone().ok_or_else(|| {
        SummaryError::ConfigError(
            "No API key found for OpenAI. Set api_key, api_key_env or OPENAI_API_KEY".to_string(),
        )
    })?;

    let client = configure(OpenAIClient::new(api_key, config.model.clone()), config)?;
    Ok(Arc::new(client))
}

/// Create an OpenAI-compatible client for custom endpoints. The key is
/// optional since local servers often run without authentication.
pub fn create_custom_client(
    config: &LlmConfig,
    base_url: &str,
) -> Result<Arc<dyn LLM>, SummaryError> {
    let api_key = config.auth.api_key.clone().unwrap_or_default();
    let client = OpenAIClient::new(api_key, config.model.clone())
        .with_api_base(base_url.to_string());

    Ok(Arc::new(configure(client, config)?))
}
