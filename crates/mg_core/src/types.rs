use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Tone used when a request does not name one.
pub const DEFAULT_TONE: &str = "best-fit";

/// Title and body text extracted from a page, either freshly fetched or
/// served from the content cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleData {
    pub url: String,
    pub title: String,
    pub content: String,
    pub fetched_at: DateTime<Utc>,
}

/// A row of the URL content cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub url: String,
    pub title: String,
    pub content: String,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tech,
    Business,
    Politics,
    Sports,
    Entertainment,
    Science,
    Health,
    General,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Tech,
        Category::Business,
        Category::Politics,
        Category::Sports,
        Category::Entertainment,
        Category::Science,
        Category::Health,
        Category::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tech => "tech",
            Category::Business => "business",
            Category::Politics => "politics",
            Category::Sports => "sports",
            Category::Entertainment => "entertainment",
            Category::Science => "science",
            Category::Health => "health",
            Category::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| crate::Error::Config(format!("Unknown category: {}", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionPair {
    pub top_text: String,
    pub bottom_text: String,
}

impl CaptionPair {
    pub fn new(top_text: impl Into<String>, bottom_text: impl Into<String>) -> Self {
        Self {
            top_text: top_text.into(),
            bottom_text: bottom_text.into(),
        }
    }

    /// Captions used whenever the model gives nothing usable.
    pub fn fallback() -> Self {
        Self::new("WHEN YOU READ THE ARTICLE", "AND REALIZE IT'S JUST CLICKBAIT")
    }
}

/// Incoming generation request as posted by the front end.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemeRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub regenerate: bool,
}

impl MemeRequest {
    pub fn new(url: impl Into<String>, tone: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            tone: Some(tone.into()),
            regenerate: false,
        }
    }

    pub fn regenerate(mut self) -> Self {
        self.regenerate = true;
        self
    }
}

/// Record fields known before the store assigns an id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMemeRecord {
    pub url: String,
    pub article_title: String,
    pub article_content: String,
    pub tone: String,
    pub template_id: String,
    pub top_text: String,
    pub bottom_text: String,
    pub meme_image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemeRecord {
    pub id: Uuid,
    pub url: String,
    pub article_title: String,
    pub article_content: String,
    pub tone: String,
    pub template_id: String,
    pub top_text: String,
    pub bottom_text: String,
    pub meme_image_url: String,
    pub created_at: DateTime<Utc>,
}

impl MemeRecord {
    pub fn from_new(new: NewMemeRecord, id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            url: new.url,
            article_title: new.article_title,
            article_content: new.article_content,
            tone: new.tone,
            template_id: new.template_id,
            top_text: new.top_text,
            bottom_text: new.bottom_text,
            meme_image_url: new.meme_image_url,
            created_at,
        }
    }
}

/// Usage event attached to a meme (regenerate, download, share_*).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemeEvent {
    pub id: Uuid,
    pub meme_id: Uuid,
    pub action_type: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_cache_entry_freshness_is_strict() {
        let now = Utc::now();
        let entry = CacheEntry {
            url: "https://example.com".to_string(),
            title: "Title".to_string(),
            content: "Body".to_string(),
            expires_at: now,
        };
        assert!(!entry.is_fresh_at(now));
        assert!(entry.is_fresh_at(now - Duration::seconds(1)));
        assert!(!entry.is_fresh_at(now + Duration::seconds(1)));
    }

    #[test]
    fn test_category_names() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert_eq!(serde_json::to_string(&Category::Tech).unwrap(), "\"tech\"");
        assert!("weather".parse::<Category>().is_err());
    }

    #[test]
    fn test_request_defaults() {
        let request: MemeRequest = serde_json::from_str(r#"{"tone": "wholesome"}"#).unwrap();
        assert!(request.url.is_none());
        assert_eq!(request.tone.as_deref(), Some("wholesome"));
        assert!(!request.regenerate);

        let request: MemeRequest =
            serde_json::from_str(r#"{"url": "https://example.com", "regenerate": true}"#).unwrap();
        assert!(request.regenerate);
    }
}
