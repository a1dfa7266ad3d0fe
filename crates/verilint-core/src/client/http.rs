//! HTTP transport: the only place status codes are interpreted.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use tracing::debug;

use super::{ChatRequest, InferenceClient};
use crate::config::InferenceConfig;
use crate::error::InferenceError;

const USER_AGENT_VALUE: &str = concat!("verilint/", env!("CARGO_PKG_VERSION"));

/// Blocking-per-call chat client for an Ollama-style `/api/chat` endpoint
/// (OpenAI-compatible endpoints work too; the interpreter reads either shape).
#[derive(Debug, Clone)]
pub struct HttpInferenceClient {
    client: reqwest::Client,
    config: InferenceConfig,
}

impl HttpInferenceClient {
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| InferenceError::Network {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    async fn complete(&self, prompt: &str) -> Result<serde_json::Value, InferenceError> {
        let body = ChatRequest::new(&self.config, prompt);
        debug!(
            endpoint = %self.config.endpoint,
            model = %self.config.model,
            prompt_chars = prompt.len(),
            "sending inference request"
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InferenceError::Server {
                status: status.as_u16(),
            });
        }

        // A stalled or truncated body is a transport failure; only a body
        // that arrives whole but is not JSON is unexpected.
        let bytes = response.bytes().await.map_err(|e| InferenceError::Network {
            message: e.to_string(),
        })?;
        serde_json::from_slice(&bytes).map_err(|e| InferenceError::Unexpected {
            message: format!("error decoding response body: {}", e),
        })
    }

    fn provider_name(&self) -> &'static str {
        "http"
    }
}
