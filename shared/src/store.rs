//! Key-value store adapter for assignment records.
//!
//! The namespace is a single table holding one row per calendar date:
//! `key` is the `YYYY-MM-DD` string and `value` is the serialized record
//! JSON. The adapter only ever touches it as get/put/delete/list by key.

use chrono::Utc;
use sqlx::PgPool;
use tracing::debug;

use crate::models::Assignment;
use crate::Result;

/// Outcome of a put: the stored record plus whether it was newly created.
#[derive(Debug)]
pub struct PutResult {
    pub record: Assignment,
    pub created: bool,
}

/// Adapter over the assignment key-value namespace.
#[derive(Debug, Clone)]
pub struct AssignmentStore {
    pool: PgPool,
}

impl AssignmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the namespace table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS assignments (key TEXT PRIMARY KEY, value JSONB NOT NULL)",
        )
        .execute(&self.pool)
        .await?;
        debug!("Assignment namespace schema ensured");
        Ok(())
    }

    /// Fetch the record for a date. Absence is `None`, not an error.
    pub async fn get(&self, date: &str) -> Result<Option<Assignment>> {
        let value: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT value FROM assignments WHERE key = $1")
                .bind(date)
                .fetch_optional(&self.pool)
                .await?;

        match value {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Create or overwrite the record for a date.
    ///
    /// Reads the existing record first so `createdAt` survives rewrites.
    /// Concurrent puts for the same key are last-write-wins.
    pub async fn put(&self, date: &str, content: &str) -> Result<PutResult> {
        let now = Utc::now();
        let (record, created) = match self.get(date).await? {
            Some(existing) => (existing.revise(content, now), false),
            None => (Assignment::new(date, content, now), true),
        };

        let value = serde_json::to_value(&record)?;
        sqlx::query(
            "INSERT INTO assignments (key, value) VALUES ($1, $2) \
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value",
        )
        .bind(date)
        .bind(&value)
        .execute(&self.pool)
        .await?;

        Ok(PutResult { record, created })
    }

    /// Remove the record for a date. Returns false when nothing was stored.
    pub async fn delete(&self, date: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM assignments WHERE key = $1")
            .bind(date)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List stored date keys in ascending order, capped at `limit`.
    pub async fn list_keys(&self, limit: i64) -> Result<Vec<String>> {
        let keys = sqlx::query_scalar("SELECT key FROM assignments ORDER BY key LIMIT $1")
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(keys)
    }
}
