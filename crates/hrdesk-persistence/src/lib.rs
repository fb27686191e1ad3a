use anyhow::{Context, Result};
use hrdesk_types::DirectoryEntry;
use sqlx::{Row, SqlitePool};
use tracing::{info, warn};

/// Key under which the employee directory is mirrored
pub const EMPLOYEES_KEY: &str = "employees";

/// Local key/value store in SQLite, standing in for browser `localStorage`
///
/// Values are whole JSON documents. Updates are read-modify-write without a
/// lock, so concurrent writers race and the last write wins.
pub struct LocalStore {
    pool: SqlitePool,
}

impl LocalStore {
    /// Open (or create) the store at `database_path`
    pub async fn new(database_path: &str) -> Result<Self> {
        let database_url = format!("sqlite:{}?mode=rwc", database_path);
        let pool = SqlitePool::connect(&database_url)
            .await
            .with_context(|| format!("Failed to open local store {}", database_path))?;

        let store = Self { pool };
        store.run_migrations().await?;

        info!("Local store initialized with database: {}", database_path);
        Ok(store)
    }

    /// Run database migrations
    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS local_storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Raw value stored under `key`
    pub async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM local_storage WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.get("value")))
    }

    /// Store `value` under `key`, replacing what was there
    pub async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO local_storage (key, value, updated_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn remove_item(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM local_storage WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// The mirrored employee directory; unreadable data reads as empty
    pub async fn load_directory(&self) -> Result<Vec<DirectoryEntry>> {
        let Some(raw) = self.get_item(EMPLOYEES_KEY).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!("Ignoring unreadable employee directory: {}", e);
                Ok(Vec::new())
            }
        }
    }

    /// Replace the whole directory
    pub async fn save_directory(&self, entries: &[DirectoryEntry]) -> Result<()> {
        let raw = serde_json::to_string(entries)?;
        self.set_item(EMPLOYEES_KEY, &raw).await
    }

    /// Insert or replace the entry with the same id
    pub async fn upsert_entry(&self, entry: DirectoryEntry) -> Result<()> {
        let mut entries = self.load_directory().await?;
        match entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
        self.save_directory(&entries).await
    }

    /// Remove the entry with `id`; returns whether one existed
    pub async fn remove_entry(&self, id: &str) -> Result<bool> {
        let mut entries = self.load_directory().await?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Ok(false);
        }
        self.save_directory(&entries).await?;
        Ok(true)
    }
}
