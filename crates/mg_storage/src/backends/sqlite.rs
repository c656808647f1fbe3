use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use mg_core::{CacheEntry, CacheStore, Error, MemeEvent, MemeRecord, NewMemeRecord, RecordStore, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteRow};
use sqlx::Row;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;
use crate::{StorageBackend, StorageConfig};

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS url_cache (
        url TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        expires_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS meme_generations (
        id TEXT PRIMARY KEY,
        url TEXT NOT NULL,
        article_title TEXT NOT NULL,
        article_content TEXT NOT NULL,
        tone TEXT NOT NULL,
        template_id TEXT NOT NULL,
        top_text TEXT NOT NULL,
        bottom_text TEXT NOT NULL,
        meme_image_url TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS meme_analytics (
        id TEXT PRIMARY KEY,
        meme_id TEXT NOT NULL REFERENCES meme_generations(id),
        action_type TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS meme_generations_created_at ON meme_generations(created_at)",
];

pub struct SQLiteStorage {
    pool: Arc<SqlitePool>,
    db_path: PathBuf,
}

#[async_trait]
impl StorageBackend for SQLiteStorage {
    fn get_error_message() -> &'static str {
        "SQLite database should be writable at the configured path"
    }

    async fn new(config: &StorageConfig) -> Result<Self> where Self: Sized {
        Self::new_with_path(&config.database_path).await
    }
}

fn db_error(context: &str, e: sqlx::Error) -> Error {
    Error::Database(format!("{}: {}", context, e))
}

// Fixed-width timestamps keep text ordering equal to time ordering.
fn format_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_time(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::Database(format!("Failed to parse date {}: {}", value, e)))
}

fn parse_id(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| Error::Database(format!("Failed to parse id {}: {}", value, e)))
}

fn text(row: &SqliteRow, column: &str) -> Result<String> {
    row.try_get::<String, _>(column)
        .map_err(|e| db_error(&format!("Failed to read column {}", column), e))
}

fn record_from_row(row: &SqliteRow) -> Result<MemeRecord> {
    Ok(MemeRecord {
        id: parse_id(&text(row, "id")?)?,
        url: text(row, "url")?,
        article_title: text(row, "article_title")?,
        article_content: text(row, "article_content")?,
        tone: text(row, "tone")?,
        template_id: text(row, "template_id")?,
        top_text: text(row, "top_text")?,
        bottom_text: text(row, "bottom_text")?,
        meme_image_url: text(row, "meme_image_url")?,
        created_at: parse_time(&text(row, "created_at")?)?,
    })
}

impl SQLiteStorage {
    pub async fn new_with_path(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| db_error("Failed to connect to database", e))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| db_error(&format!("Failed to run migration {}", i), e))?;
        }

        Ok(Self {
            pool: Arc::new(pool),
            db_path: db_path.to_path_buf(),
        })
    }

    pub fn get_db_path(&self) -> &Path {
        &self.db_path
    }
}

#[async_trait]
impl CacheStore for SQLiteStorage {
    async fn get_entry(&self, url: &str) -> Result<Option<CacheEntry>> {
        let row = sqlx::query("SELECT url, title, content, expires_at FROM url_cache WHERE url = ?")
            .bind(url)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| db_error("Failed to read cache entry", e))?;

        row.map(|row| -> Result<CacheEntry> {
            Ok(CacheEntry {
                url: text(&row, "url")?,
                title: text(&row, "title")?,
                content: text(&row, "content")?,
                expires_at: parse_time(&text(&row, "expires_at")?)?,
            })
        })
        .transpose()
    }

    async fn upsert_entry(&self, entry: &CacheEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO url_cache (url, title, content, expires_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&entry.url)
        .bind(&entry.title)
        .bind(&entry.content)
        .bind(format_time(&entry.expires_at))
        .execute(&*self.pool)
        .await
        .map_err(|e| db_error("Failed to store cache entry", e))?;

        Ok(())
    }
}

#[async_trait]
impl RecordStore for SQLiteStorage {
    async fn insert_record(&self, record: NewMemeRecord) -> Result<MemeRecord> {
        let record = MemeRecord::from_new(record, Uuid::new_v4(), Utc::now());

        sqlx::query(
            r#"
            INSERT INTO meme_generations
            (id, url, article_title, article_content, tone, template_id, top_text, bottom_text, meme_image_url, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.id.to_string())
        .bind(&record.url)
        .bind(&record.article_title)
        .bind(&record.article_content)
        .bind(&record.tone)
        .bind(&record.template_id)
        .bind(&record.top_text)
        .bind(&record.bottom_text)
        .bind(&record.meme_image_url)
        .bind(format_time(&record.created_at))
        .execute(&*self.pool)
        .await
        .map_err(|e| db_error("Failed to store meme", e))?;

        Ok(record)
    }

    async fn get_record(&self, id: Uuid) -> Result<Option<MemeRecord>> {
        let row = sqlx::query("SELECT * FROM meme_generations WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| db_error("Failed to read meme", e))?;

        row.as_ref().map(record_from_row).transpose()
    }

    async fn recent_records(&self, limit: usize) -> Result<Vec<MemeRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM meme_generations
            ORDER BY created_at DESC
            LIMIT ?
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| db_error("Failed to list recent memes", e))?;

        rows.iter().map(record_from_row).collect()
    }

    async fn record_event(&self, meme_id: Uuid, action_type: &str) -> Result<MemeEvent> {
        if self.get_record(meme_id).await?.is_none() {
            return Err(Error::NotFound(format!("meme {}", meme_id)));
        }

        let event = MemeEvent {
            id: Uuid::new_v4(),
            meme_id,
            action_type: action_type.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query("INSERT INTO meme_analytics (id, meme_id, action_type, created_at) VALUES (?, ?, ?, ?)")
            .bind(event.id.to_string())
            .bind(event.meme_id.to_string())
            .bind(&event.action_type)
            .bind(format_time(&event.created_at))
            .execute(&*self.pool)
            .await
            .map_err(|e| db_error("Failed to store meme event", e))?;

        Ok(event)
    }
}
