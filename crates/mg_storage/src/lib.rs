use async_trait::async_trait;
use mg_core::{CacheStore, Error, RecordStore, Result};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

pub mod backends;
pub mod cache;

pub use backends::*;
pub use cache::ContentCache;

#[async_trait]
pub trait StorageBackend: CacheStore + RecordStore {
    fn get_error_message() -> &'static str;
    async fn new(config: &StorageConfig) -> Result<Self> where Self: Sized;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Memory,
    SQLite,
}

impl FromStr for StorageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StorageKind::Memory),
            "sqlite" => Ok(StorageKind::SQLite),
            other => Err(Error::Config(format!(
                "Unknown storage backend: {}. Available backends: memory, sqlite",
                other
            ))),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKind::Memory => write!(f, "memory"),
            StorageKind::SQLite => write!(f, "sqlite"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub kind: StorageKind,
    pub database_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            kind: StorageKind::Memory,
            database_path: PathBuf::from("memes.db"),
        }
    }
}

/// The two stores the pipeline talks to. Both usually point at the same
/// backend.
#[derive(Clone)]
pub struct Storage {
    pub cache: Arc<dyn CacheStore>,
    pub records: Arc<dyn RecordStore>,
}

impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage")
            .field("cache", &"<dyn CacheStore>")
            .field("records", &"<dyn RecordStore>")
            .finish()
    }
}

impl Storage {
    pub fn from_backend<T: StorageBackend + 'static>(backend: T) -> Self {
        let backend = Arc::new(backend);
        Self {
            cache: backend.clone(),
            records: backend,
        }
    }
}

async fn open<T: StorageBackend + 'static>(config: &StorageConfig) -> Result<Storage> {
    let backend = T::new(config)
        .await
        .map_err(|e| Error::Storage(format!("{} ({})", e, T::get_error_message())))?;
    Ok(Storage::from_backend(backend))
}

pub async fn create_storage(config: &StorageConfig) -> Result<Storage> {
    match config.kind {
        StorageKind::Memory => open::<MemoryStorage>(config).await,
        #[cfg(feature = "sqlite")]
        StorageKind::SQLite => open::<SQLiteStorage>(config).await,
        #[cfg(not(feature = "sqlite"))]
        StorageKind::SQLite => Err(Error::Config(
            "SQLite storage support is not compiled in; rebuild with the `sqlite` feature".to_string(),
        )),
    }
}

pub mod prelude {
    pub use super::{create_storage, ContentCache, Storage, StorageBackend, StorageConfig, StorageKind};
    pub use super::backends::*;
}
