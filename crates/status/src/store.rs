//! Status store trait and the SQLite implementation.

use crate::error::StatusResult;
use crate::models::StatusRow;
use crate::repos::StatusRepo;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use strata_core::StatusRecord;

/// SQLite schema (embedded).
const SQLITE_SCHEMA: &str = include_str!("sqlite_schema.sql");

/// Combined status store trait.
#[async_trait]
pub trait StatusStore: StatusRepo + Send + Sync {
    /// Run database migrations.
    async fn migrate(&self) -> StatusResult<()>;

    /// Check database connectivity. No side effects.
    async fn health_check(&self) -> StatusResult<()>;

    /// Close the connection pool, waiting for checked-out connections to return.
    async fn close(&self);
}

/// Split an embedded schema into executable statements, skipping comment-only fragments.
pub(crate) fn schema_statements(schema: &str) -> Vec<&str> {
    schema
        .split(';')
        .filter_map(|statement| {
            let trimmed = statement.trim();
            let has_sql = trimmed.lines().any(|line| {
                let line = line.trim();
                !line.is_empty() && !line.starts_with("--")
            });
            has_sql.then_some(trimmed)
        })
        .collect()
}

/// SQLite-based status store.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Create a new SQLite store, creating the database file if needed.
    pub async fn new(path: impl AsRef<Path>) -> StatusResult<Self> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            // Prevent transient "database is locked" errors under concurrent access.
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            // SQLite permits limited write concurrency; a single connection
            // serializes writers instead of failing them.
            .max_connections(1)
            .connect_with(opts)
            .await?;

        let store = Self { pool };
        store.migrate().await?;

        tracing::debug!(path = %path.display(), "SQLite status store ready");

        Ok(store)
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

#[async_trait]
impl StatusStore for SqliteStore {
    async fn migrate(&self) -> StatusResult<()> {
        for statement in schema_statements(SQLITE_SCHEMA) {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    async fn health_check(&self) -> StatusResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl StatusRepo for SqliteStore {
    async fn get_status_row(&self, study_uid: &str) -> StatusResult<Option<StatusRow>> {
        tracing::debug!(study_uid = %study_uid, "Querying study status");
        let row = sqlx::query_as::<_, StatusRow>(
            r#"
            SELECT study_instance_uid, tier, location_type, edge_id, last_updated
            FROM study_status
            WHERE study_instance_uid = ?
            "#,
        )
        .bind(study_uid)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn set_status(&self, study_uid: &str, status: &StatusRecord) -> StatusResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO study_status (study_instance_uid, tier, location_type, edge_id, last_updated)
            VALUES (?, ?, ?, ?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            ON CONFLICT(study_instance_uid) DO UPDATE SET
                tier = excluded.tier,
                location_type = excluded.location_type,
                edge_id = excluded.edge_id,
                last_updated = excluded.last_updated
            "#,
        )
        .bind(study_uid)
        .bind(status.tier.as_str())
        .bind(status.location_type().as_str())
        .bind(status.edge_id())
        .execute(&self.pool)
        .await?;

        tracing::debug!(
            study_uid = %study_uid,
            tier = %status.tier,
            rows_affected = result.rows_affected(),
            "Upserted study status"
        );
        Ok(())
    }
}
