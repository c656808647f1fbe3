use async_trait::async_trait;
use chrono::Utc;
use mg_core::{CacheEntry, CacheStore, Error, MemeEvent, MemeRecord, NewMemeRecord, RecordStore, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;
use crate::{StorageBackend, StorageConfig};

#[derive(Default)]
pub struct MemoryStore {
    cache: HashMap<String, CacheEntry>,
    records: Vec<MemeRecord>,
    events: Vec<MemeEvent>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_entry(&self, url: &str) -> Option<CacheEntry> {
        self.cache.get(url).cloned()
    }

    pub fn upsert_entry(&mut self, entry: &CacheEntry) {
        self.cache.insert(entry.url.clone(), entry.clone());
    }

    pub fn insert_record(&mut self, record: NewMemeRecord) -> MemeRecord {
        let record = MemeRecord::from_new(record, Uuid::new_v4(), Utc::now());
        self.records.push(record.clone());
        record
    }

    pub fn get_record(&self, id: Uuid) -> Option<MemeRecord> {
        self.records.iter().find(|r| r.id == id).cloned()
    }

    pub fn recent_records(&self, limit: usize) -> Vec<MemeRecord> {
        // Records are appended in creation order.
        self.records.iter().rev().take(limit).cloned().collect()
    }

    pub fn record_event(&mut self, meme_id: Uuid, action_type: &str) -> Result<MemeEvent> {
        if !self.records.iter().any(|r| r.id == meme_id) {
            return Err(Error::NotFound(format!("meme {}", meme_id)));
        }
        let event = MemeEvent {
            id: Uuid::new_v4(),
            meme_id,
            action_type: action_type.to_string(),
            created_at: Utc::now(),
        };
        self.events.push(event.clone());
        Ok(event)
    }

    pub fn events_for(&self, meme_id: Uuid) -> Vec<MemeEvent> {
        self.events.iter().filter(|e| e.meme_id == meme_id).cloned().collect()
    }
}

/// Process-local storage. Everything is lost on restart.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record_count(&self) -> usize {
        self.store.read().await.records.len()
    }

    pub async fn events_for(&self, meme_id: Uuid) -> Vec<MemeEvent> {
        self.store.read().await.events_for(meme_id)
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    fn get_error_message() -> &'static str {
        "Memory storage should always be available"
    }

    async fn new(_config: &StorageConfig) -> Result<Self> where Self: Sized {
        Ok(MemoryStorage::new())
    }
}

#[async_trait]
impl CacheStore for MemoryStorage {
    async fn get_entry(&self, url: &str) -> Result<Option<CacheEntry>> {
        Ok(self.store.read().await.get_entry(url))
    }

    async fn upsert_entry(&self, entry: &CacheEntry) -> Result<()> {
        self.store.write().await.upsert_entry(entry);
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStorage {
    async fn insert_record(&self, record: NewMemeRecord) -> Result<MemeRecord> {
        Ok(self.store.write().await.insert_record(record))
    }

    async fn get_record(&self, id: Uuid) -> Result<Option<MemeRecord>> {
        Ok(self.store.read().await.get_record(id))
    }

    async fn recent_records(&self, limit: usize) -> Result<Vec<MemeRecord>> {
        Ok(self.store.read().await.recent_records(limit))
    }

    async fn record_event(&self, meme_id: Uuid, action_type: &str) -> Result<MemeEvent> {
        self.store.write().await.record_event(meme_id, action_type)
    }
}
