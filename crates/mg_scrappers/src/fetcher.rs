use chrono::Utc;
use mg_core::ArticleData;
use mg_storage::ContentCache;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};
use crate::extract::{extract_content, extract_title, FALLBACK_TITLE};
use crate::source::PageSource;

pub const FALLBACK_CONTENT: &str = "Content could not be extracted from this URL.";

/// Fetches a page and reduces it to title and body text. Never fails: a
/// page that cannot be fetched becomes a placeholder article.
pub struct ContentFetcher {
    source: Arc<dyn PageSource>,
    cache: ContentCache,
    max_content_chars: usize,
}

impl fmt::Debug for ContentFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentFetcher")
            .field("source", &"<dyn PageSource>")
            .field("cache", &self.cache)
            .field("max_content_chars", &self.max_content_chars)
            .finish()
    }
}

impl ContentFetcher {
    pub fn new(source: Arc<dyn PageSource>, cache: ContentCache, max_content_chars: usize) -> Self {
        Self {
            source,
            cache,
            max_content_chars,
        }
    }

    pub fn placeholder(url: &str) -> ArticleData {
        ArticleData {
            url: url.to_string(),
            title: FALLBACK_TITLE.to_string(),
            content: FALLBACK_CONTENT.to_string(),
            fetched_at: Utc::now(),
        }
    }

    /// Fetch and extract `url`. Successful extractions are written to the
    /// cache even when the caller skipped the cache lookup.
    pub async fn fetch(&self, url: &str) -> ArticleData {
        info!("🦗 Scraping content for URL: {}", url);

        let html = match self.source.fetch_page(url).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Scraping failed for {}: {}", url, e);
                return Self::placeholder(url);
            }
        };

        let article = ArticleData {
            url: url.to_string(),
            title: extract_title(&html),
            content: extract_content(&html, self.max_content_chars),
            fetched_at: Utc::now(),
        };

        if let Err(e) = self.cache.put(url, &article.title, &article.content).await {
            warn!("Failed to cache content for {}: {}", url, e);
        }

        info!(
            "Scraped and cached content: {:?} ({} chars)",
            article.title,
            article.content.chars().count()
        );
        article
    }
}
