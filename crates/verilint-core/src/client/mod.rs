//! Inference client boundary.
//!
//! Every failure is returned as an [`InferenceError`] value; nothing panics
//! or escapes past `complete`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::InferenceConfig;
use crate::error::InferenceError;
use crate::prompt::SYSTEM_PROMPT;

pub mod fake;
mod http;

pub use fake::FakeInferenceClient;
pub use http::HttpInferenceClient;

#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Send one composed prompt and return the decoded JSON body.
    async fn complete(&self, prompt: &str) -> Result<serde_json::Value, InferenceError>;

    fn provider_name(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Request body: `{model, messages, max_tokens, temperature, stream}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub stream: bool,
}

impl ChatRequest {
    pub fn new(config: &InferenceConfig, prompt: &str) -> Self {
        Self {
            model: config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format!("{}{}", prompt, config.prompt_suffix),
                },
            ],
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            stream: false,
        }
    }
}
