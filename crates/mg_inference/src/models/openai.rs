use std::sync::Arc;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use mg_core::{ChatMessage, ChatModel, CompletionOptions, Config, Result};
use std::fmt;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<Message>,
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiModel {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    model_name: String,
}

impl OpenAiModel {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.api_key()?.to_string();
        Ok(Self {
            client: Arc::new(Client::new()),
            api_key,
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            model_name: config.model_name.clone(),
        })
    }
}

impl fmt::Debug for OpenAiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model_name", &self.model_name)
            .finish()
    }
}

#[async_trait]
impl ChatModel for OpenAiModel {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn complete(&self, messages: &[ChatMessage], options: CompletionOptions) -> Result<Option<String>> {
        let request = ChatRequest {
            model: &self.model_name,
            messages,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        };

        let response = self.client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<ChatResponse>()
            .await?;

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mg_core::Error;
    use mockito::Matcher;
    use serde_json::json;

    const OPTIONS: CompletionOptions = CompletionOptions { max_tokens: 150, temperature: 0.8 };

    fn model_for(server: &mockito::Server) -> OpenAiModel {
        let config = Config::default()
            .with_api_key("sk-test")
            .with_openai_base_url(format!("{}/v1/", server.url()));
        OpenAiModel::new(&config).unwrap()
    }

    #[test]
    fn test_model_requires_api_key() {
        let result = OpenAiModel::new(&Config::default());
        assert!(matches!(result, Err(Error::MissingCredential(_))));
        assert_eq!(result.unwrap_err().to_string(), "OpenAI API key not configured");

        assert!(OpenAiModel::new(&Config::default().with_api_key("sk-test")).is_ok());
    }

    #[tokio::test]
    async fn test_complete_sends_openai_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-4o-mini",
                "max_tokens": 150,
                "messages": [
                    {"role": "system", "content": "be funny"},
                    {"role": "user", "content": "hello"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"{\"top_text\":\"A\",\"bottom_text\":\"B\"}"}}]}"#)
            .create_async()
            .await;

        let model = model_for(&server);
        let messages = [ChatMessage::system("be funny"), ChatMessage::user("hello")];
        let content = model.complete(&messages, OPTIONS).await.unwrap();
        assert_eq!(content.as_deref(), Some(r#"{"top_text":"A","bottom_text":"B"}"#));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_content_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let model = model_for(&server);
        let content = model.complete(&[ChatMessage::user("hello")], OPTIONS).await.unwrap();
        assert!(content.is_none());
    }

    #[tokio::test]
    async fn test_error_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
            .create_async()
            .await;

        let model = model_for(&server);
        assert!(model.complete(&[ChatMessage::user("hello")], OPTIONS).await.is_err());
    }
}
