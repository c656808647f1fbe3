pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use models::{ChatMessage, ChatModel, CompletionOptions};
pub use storage::{CacheStore, RecordStore};
pub use types::{
    ArticleData, CacheEntry, CaptionPair, Category, MemeEvent, MemeRecord, MemeRequest, NewMemeRecord,
    DEFAULT_TONE,
};
