use chrono::{DateTime, Duration, Utc};
use mg_core::{ArticleData, CacheEntry, CacheStore, Result};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// URL content cache with lazy expiry: stale rows stay in the store and are
/// simply not served.
#[derive(Clone)]
pub struct ContentCache {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl fmt::Debug for ContentCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentCache")
            .field("store", &"<dyn CacheStore>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl ContentCache {
    pub fn new(store: Arc<dyn CacheStore>, ttl: std::time::Duration) -> Self {
        Self {
            store,
            ttl: Duration::seconds(ttl.as_secs() as i64),
        }
    }

    pub async fn get(&self, url: &str) -> Option<ArticleData> {
        self.get_at(url, Utc::now()).await
    }

    /// Look up `url`, serving it only if it expires strictly after `now`.
    /// A failing store counts as a miss.
    pub async fn get_at(&self, url: &str, now: DateTime<Utc>) -> Option<ArticleData> {
        let entry = match self.store.get_entry(url).await {
            Ok(entry) => entry?,
            Err(e) => {
                warn!("Cache lookup failed for {}: {}", url, e);
                return None;
            }
        };

        if !entry.is_fresh_at(now) {
            debug!("Cache entry for {} expired at {}", url, entry.expires_at);
            return None;
        }

        Some(ArticleData {
            fetched_at: entry.expires_at - self.ttl,
            url: entry.url,
            title: entry.title,
            content: entry.content,
        })
    }

    pub async fn put(&self, url: &str, title: &str, content: &str) -> Result<CacheEntry> {
        self.put_at(url, title, content, Utc::now()).await
    }

    pub async fn put_at(&self, url: &str, title: &str, content: &str, now: DateTime<Utc>) -> Result<CacheEntry> {
        let entry = CacheEntry {
            url: url.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            expires_at: now + self.ttl,
        };
        self.store.upsert_entry(&entry).await?;
        Ok(entry)
    }
}
