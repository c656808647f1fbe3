use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub max_tokens: u32,
    pub temperature: f32,
}

#[async_trait]
pub trait ChatModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Run a chat completion. `Ok(None)` means the model answered without
    /// any message content.
    async fn complete(&self, messages: &[ChatMessage], options: CompletionOptions) -> Result<Option<String>>;
}
