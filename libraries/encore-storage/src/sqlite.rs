//! `SQLite`-backed key-value store

use crate::error::StorageError;
use async_trait::async_trait;
use encore_core::{KeyValueStore, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

// Embedded so the binary works regardless of the working directory
const MIGRATIONS: &[&str] = &[include_str!(
    "../migrations/20250301000001_create_kv_store.sql"
)];

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://encore.db>`)
///
/// In-memory databases get a single connection, otherwise every pooled
/// connection would see its own empty database.
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> std::result::Result<SqlitePool, StorageError> {
    tracing::debug!("Creating SQLite pool for {}", database_url);

    let in_memory = database_url.contains(":memory:");

    let mut options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(30));
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let mut pool_options = SqlitePoolOptions::new().max_connections(5);
    if in_memory {
        // The database lives and dies with its only connection
        pool_options = pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    Ok(pool)
}

/// Run database migrations
///
/// Idempotent; safe to call on every start.
///
/// # Errors
///
/// Returns an error if a migration statement fails
pub async fn run_migrations(pool: &SqlitePool) -> std::result::Result<(), StorageError> {
    for migration in MIGRATIONS {
        sqlx::query(migration)
            .execute(pool)
            .await
            .map_err(|e| StorageError::Migration(e.to_string()))?;
    }
    Ok(())
}

/// Key-value store over a single `kv_store` table
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect and migrate
    ///
    /// # Errors
    /// Returns an error if the connection or migrations fail
    pub async fn open(database_url: &str) -> std::result::Result<Self, StorageError> {
        let pool = create_pool(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Wrap an existing, already migrated pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// All stored keys, sorted
    ///
    /// # Errors
    /// Returns an error if the query fails
    pub async fn keys(&self) -> std::result::Result<Vec<String>, StorageError> {
        let keys = sqlx::query_scalar::<_, String>("SELECT key FROM kv_store ORDER BY key")
            .fetch_all(&self.pool)
            .await?;
        Ok(keys)
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}
