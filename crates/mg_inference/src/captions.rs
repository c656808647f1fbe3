use mg_core::{CaptionPair, ChatMessage, ChatModel, CompletionOptions, Config};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Asks a chat model for a top/bottom caption pair. Any problem with the
/// model, its transport or its output yields [`CaptionPair::fallback`].
pub struct CaptionGenerator {
    model: Arc<dyn ChatModel>,
    options: CompletionOptions,
    prompt_content_chars: usize,
}

impl fmt::Debug for CaptionGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptionGenerator")
            .field("model", &self.model.name())
            .field("options", &self.options)
            .field("prompt_content_chars", &self.prompt_content_chars)
            .finish()
    }
}

impl CaptionGenerator {
    pub fn new(model: Arc<dyn ChatModel>, config: &Config) -> Self {
        Self {
            model,
            options: CompletionOptions {
                max_tokens: config.max_tokens,
                temperature: config.temperature,
            },
            prompt_content_chars: config.prompt_content_chars,
        }
    }

    pub fn system_prompt(tone: &str, template_id: &str) -> String {
        format!(
            r#"You are a meme caption generator. Given an article title and content, create funny meme captions that summarize the key point in a {tone} tone.

The meme template being used is "{template_id}" - consider this when crafting your captions.

Return ONLY a JSON object with this exact format:
{{
  "top_text": "TOP CAPTION TEXT",
  "bottom_text": "BOTTOM CAPTION TEXT"
}}

Guidelines:
- Keep each caption under 30 characters
- Make it relatable and shareable
- Capture the essence of the article
- Use appropriate {tone} tone
- Make it meme-worthy
- Consider the "{template_id}" template context"#
        )
    }

    pub fn user_prompt(&self, title: &str, content: &str) -> String {
        let excerpt: String = content.chars().take(self.prompt_content_chars).collect();
        format!("Article: \"{}\"\nContent: \"{}\"", title, excerpt)
    }

    pub async fn generate(&self, title: &str, content: &str, tone: &str, template_id: &str) -> CaptionPair {
        let messages = [
            ChatMessage::system(Self::system_prompt(tone, template_id)),
            ChatMessage::user(self.user_prompt(title, content)),
        ];

        info!("🧠 Generating captions with {} (template {})", self.model.name(), template_id);
        let raw = match self.model.complete(&messages, self.options).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                warn!("Caption model returned no content, using fallback captions");
                return CaptionPair::fallback();
            }
            Err(e) => {
                warn!("Caption model call failed, using fallback captions: {}", e);
                return CaptionPair::fallback();
            }
        };

        match parse_captions(&raw) {
            Some(captions) => {
                debug!("Generated captions: {:?}", captions);
                captions
            }
            None => {
                warn!("Caption model output is not a caption object, using fallback: {:?}", raw);
                CaptionPair::fallback()
            }
        }
    }
}

/// Parse model output as a JSON object with string `top_text` and
/// `bottom_text` fields. Surrounding whitespace is allowed, anything else is
/// rejected.
pub fn parse_captions(raw: &str) -> Option<CaptionPair> {
    serde_json::from_str::<CaptionPair>(raw.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DummyModel;
    use async_trait::async_trait;
    use mg_core::{Error, Result};
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingModel {
        seen: Mutex<Vec<(Vec<ChatMessage>, CompletionOptions)>>,
    }

    #[async_trait]
    impl ChatModel for RecordingModel {
        fn name(&self) -> &str {
            "Recording"
        }

        async fn complete(&self, messages: &[ChatMessage], options: CompletionOptions) -> Result<Option<String>> {
            self.seen.lock().unwrap().push((messages.to_vec(), options));
            Ok(Some(r#"{"top_text": "ROBOTS", "bottom_text": "EVERYWHERE"}"#.to_string()))
        }
    }

    #[derive(Debug)]
    struct FailingModel;

    #[async_trait]
    impl ChatModel for FailingModel {
        fn name(&self) -> &str {
            "Failing"
        }

        async fn complete(&self, _messages: &[ChatMessage], _options: CompletionOptions) -> Result<Option<String>> {
            Err(Error::Inference("model unavailable".to_string()))
        }
    }

    fn generator(model: Arc<dyn ChatModel>) -> CaptionGenerator {
        CaptionGenerator::new(model, &Config::default())
    }

    #[tokio::test]
    async fn test_generate_sends_prompts_and_parses() {
        let model = Arc::new(RecordingModel::default());
        let captions = generator(model.clone())
            .generate("AI Breakthrough", &"x".repeat(1500), "sarcastic", "expanding-brain")
            .await;
        assert_eq!(captions, CaptionPair::new("ROBOTS", "EVERYWHERE"));

        let seen = model.seen.lock().unwrap();
        let (messages, options) = &seen[0];
        assert_eq!(options.max_tokens, 150);
        assert_eq!(options.temperature, 0.8);
        assert_eq!(messages[0].role, "system");
        assert!(messages[0].content.contains("in a sarcastic tone"));
        assert!(messages[0].content.contains("\"expanding-brain\""));
        assert_eq!(messages[1].role, "user");
        assert_eq!(
            messages[1].content,
            format!("Article: \"AI Breakthrough\"\nContent: \"{}\"", "x".repeat(1000))
        );
    }

    #[tokio::test]
    async fn test_malformed_output_falls_back() {
        for raw in [
            "Sure! Here are your captions: TOP / BOTTOM",
            "```json\n{\"top_text\": \"A\", \"bottom_text\": \"B\"}\n```",
            r#"{"top_text": "only one"}"#,
            r#"{"top_text": 1, "bottom_text": 2}"#,
            "[]",
            "",
        ] {
            let captions = generator(Arc::new(DummyModel::with_response(raw)))
                .generate("Title", "Content", "wholesome", "drake")
                .await;
            assert_eq!(captions, CaptionPair::fallback(), "{:?}", raw);
        }
    }

    #[tokio::test]
    async fn test_missing_content_and_errors_fall_back() {
        let captions = generator(Arc::new(DummyModel::silent()))
            .generate("Title", "Content", "wholesome", "drake")
            .await;
        assert_eq!(captions, CaptionPair::fallback());

        let captions = generator(Arc::new(FailingModel))
            .generate("Title", "Content", "wholesome", "drake")
            .await;
        assert_eq!(captions.top_text, "WHEN YOU READ THE ARTICLE");
        assert_eq!(captions.bottom_text, "AND REALIZE IT'S JUST CLICKBAIT");
    }

    #[tokio::test]
    async fn test_no_retry_on_bad_output() {
        let model = Arc::new(DummyModel::with_response("not json"));
        generator(model.clone()).generate("Title", "Content", "dry", "drake").await;
        assert_eq!(model.calls(), 1);
    }

    #[test]
    fn test_parse_captions_accepts_whitespace() {
        assert_eq!(
            parse_captions("\n  {\"top_text\": \"A\", \"bottom_text\": \"B\"}  \n"),
            Some(CaptionPair::new("A", "B"))
        );
    }
}
