use std::fmt;
use std::time::Duration;
use url::Url;
use crate::{Error, Result};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL_NAME: &str = "gpt-4o-mini";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://api.memegen.link";

/// Settings shared by every stage of the pipeline. Built once at startup and
/// handed to each component instead of being read from the environment.
#[derive(Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub model_name: String,
    pub image_base_url: String,
    pub cache_ttl: Duration,
    pub max_content_chars: usize,
    pub prompt_content_chars: usize,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            cache_ttl: Duration::from_secs(24 * 60 * 60),
            max_content_chars: 2000,
            prompt_content_chars: 1000,
            max_tokens: 150,
            temperature: 0.8,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &self.openai_api_key.as_deref().map(|_| "<redacted>"))
            .field("openai_base_url", &self.openai_base_url)
            .field("model_name", &self.model_name)
            .field("image_base_url", &self.image_base_url)
            .field("cache_ttl", &self.cache_ttl)
            .field("max_content_chars", &self.max_content_chars)
            .field("prompt_content_chars", &self.prompt_content_chars)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl Config {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.openai_api_key = Some(api_key.into());
        self
    }

    pub fn with_image_base_url(mut self, url: impl Into<String>) -> Self {
        self.image_base_url = url.into();
        self
    }

    pub fn with_openai_base_url(mut self, url: impl Into<String>) -> Self {
        self.openai_base_url = url.into();
        self
    }

    /// The model credential, treating blank values as missing.
    pub fn api_key(&self) -> Result<&str> {
        match self.openai_api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(Error::MissingCredential("OpenAI".to_string())),
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("openai_base_url", &self.openai_base_url),
            ("image_base_url", &self.image_base_url),
        ] {
            Url::parse(value).map_err(|e| Error::Config(format!("{} is not a valid URL: {}", name, e)))?;
        }
        if self.max_content_chars == 0 {
            return Err(Error::Config("max_content_chars must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_api_key_is_missing() {
        let config = Config::default();
        assert!(matches!(config.api_key(), Err(Error::MissingCredential(_))));

        let config = Config::default().with_api_key("   ");
        assert!(config.api_key().is_err());

        let config = Config::default().with_api_key("sk-test");
        assert_eq!(config.api_key().unwrap(), "sk-test");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = Config::default().with_api_key("sk-secret");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        assert!(Config::default().validate().is_ok());
        assert!(Config::default().with_image_base_url("not a url").validate().is_err());
    }
}
