//! Scripted in-memory client for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use super::InferenceClient;
use crate::error::InferenceError;

/// Replays queued replies in order and records every prompt it receives.
/// Once the queue is empty every call answers `RESULT: [NO]`.
#[derive(Debug, Default)]
pub struct FakeInferenceClient {
    replies: Mutex<VecDeque<Result<serde_json::Value, InferenceError>>>,
    prompts: Mutex<Vec<String>>,
}

impl FakeInferenceClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply whose `message.content` is `text`.
    pub fn push_text(&self, text: impl Into<String>) -> &Self {
        self.push(Ok(json!({
            "message": { "role": "assistant", "content": text.into() }
        })))
    }

    pub fn push(&self, reply: Result<serde_json::Value, InferenceError>) -> &Self {
        self.replies
            .lock()
            .expect("fake replies lock poisoned")
            .push_back(reply);
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .expect("fake prompts lock poisoned")
            .clone()
    }
}

#[async_trait]
impl InferenceClient for FakeInferenceClient {
    async fn complete(&self, prompt: &str) -> Result<serde_json::Value, InferenceError> {
        self.prompts
            .lock()
            .expect("fake prompts lock poisoned")
            .push(prompt.to_string());
        self.replies
            .lock()
            .expect("fake replies lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Ok(json!({ "message": { "content": "RESULT: [NO]" } })))
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
