use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use mg_core::{ChatMessage, ChatModel, CompletionOptions, Result};

pub const DUMMY_CAPTIONS: &str = r#"{"top_text": "ME READING THE HEADLINE", "bottom_text": "ME READING THE ARTICLE"}"#;

/// Offline model answering every prompt with the same content.
pub struct DummyModel {
    response: Option<String>,
    calls: AtomicUsize,
}

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel")
            .field("response", &self.response)
            .finish()
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::with_response(DUMMY_CAPTIONS)
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// A model whose replies carry no message content.
    pub fn silent() -> Self {
        Self {
            response: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ChatModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn complete(&self, _messages: &[ChatMessage], _options: CompletionOptions) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}
