// src/provider/text.rs

use reqwest::blocking::Client;
use serde_json::{json, Value};
use thiserror::Error;

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const OPENAI_MODEL: &str = "gpt-4o";

const ANTHROPIC_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_MODEL: &str = "claude-3-5-sonnet-20240620";
const ANTHROPIC_VERSION: &str = "2023-06-01";

const MAX_TOKENS: u32 = 2048;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Invalid provider kind `{0}`. Please choose `openai` or `anthropic`")]
    InvalidProviderKind(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

pub type Result<T> = std::result::Result<T, ProviderError>;

/// Base trait for text-generation backends: prompt in, answer text out.
///
/// Both backends normalize their wire response down to a single string, so
/// nothing variant-specific leaks past this boundary.
pub trait TextGenerator: Send + Sync {
    fn generate_text(&self, prompt: &str) -> Result<String>;
}

/// Factory function to create a generator from its discriminant
pub fn create_generator(kind: &str, api_key: &str) -> Result<Box<dyn TextGenerator>> {
    match kind {
        "openai" => Ok(Box::new(OpenAiGenerator::new(api_key))),
        "anthropic" => Ok(Box::new(AnthropicGenerator::new(api_key))),
        other => Err(ProviderError::InvalidProviderKind(other.to_string())),
    }
}

// OpenAI chat-completions backend
pub struct OpenAiGenerator {
    client: Client,
    api_key: String,
}

impl OpenAiGenerator {
    pub fn new(api_key: &str) -> Self {
        OpenAiGenerator {
            client: Client::new(),
            api_key: api_key.to_string(),
        }
    }
}

impl TextGenerator for OpenAiGenerator {
    fn generate_text(&self, prompt: &str) -> Result<String> {
        let payload = json!({
            "model": OPENAI_MODEL,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": MAX_TOKENS,
        });

        let response: Value = self
            .client
            .post(OPENAI_CHAT_URL)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()?
            .error_for_status()?
            .json()?;

        extract_chat_text(&response)
    }
}

// Anthropic messages backend
pub struct AnthropicGenerator {
    client: Client,
    api_key: String,
}

impl AnthropicGenerator {
    pub fn new(api_key: &str) -> Self {
        AnthropicGenerator {
            client: Client::new(),
            api_key: api_key.to_string(),
        }
    }
}

impl TextGenerator for AnthropicGenerator {
    fn generate_text(&self, prompt: &str) -> Result<String> {
        let payload = json!({
            "model": ANTHROPIC_MODEL,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": MAX_TOKENS,
        });

        let response: Value = self
            .client
            .post(ANTHROPIC_MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&payload)
            .send()?
            .error_for_status()?
            .json()?;

        extract_message_text(&response)
    }
}

/// Pull the answer text out of an OpenAI chat-completions response
pub fn extract_chat_text(response: &Value) -> Result<String> {
    response
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| {
            ProviderError::MalformedResponse("missing choices[0].message.content".to_string())
        })
}

/// Pull the answer text out of an Anthropic messages response
pub fn extract_message_text(response: &Value) -> Result<String> {
    response
        .get("content")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("text"))
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| ProviderError::MalformedResponse("missing content[0].text".to_string()))
}
