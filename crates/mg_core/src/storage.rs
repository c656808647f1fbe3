use async_trait::async_trait;
use uuid::Uuid;
use crate::types::{CacheEntry, MemeEvent, MemeRecord, NewMemeRecord};
use crate::Result;

/// Keyed store behind the URL content cache. Freshness is decided by the
/// caller; the store only keeps rows.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Get the row for `url`, expired or not
    async fn get_entry(&self, url: &str) -> Result<Option<CacheEntry>>;

    /// Insert or replace the row for `entry.url`
    async fn upsert_entry(&self, entry: &CacheEntry) -> Result<()>;
}

/// Append-only store of generated memes.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a record, returning it with its generated id and timestamp
    async fn insert_record(&self, record: NewMemeRecord) -> Result<MemeRecord>;

    /// Get a record by id
    async fn get_record(&self, id: Uuid) -> Result<Option<MemeRecord>>;

    /// Most recent records first
    async fn recent_records(&self, limit: usize) -> Result<Vec<MemeRecord>>;

    /// Append a usage event for an existing record
    async fn record_event(&self, meme_id: Uuid, action_type: &str) -> Result<MemeEvent>;
}
