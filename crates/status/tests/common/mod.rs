//! Status store test utilities.

use sqlx::{Pool, Postgres as SqlxPostgres, Sqlite};
use std::sync::Arc;
use strata_status::{
    PoolSettings, PostgresStore, SqliteStore, StatusError, StatusResult, StatusStore,
};
use tempfile::TempDir;
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;

/// Stable prefix for Docker/container startup failures in Postgres test setup.
/// Tests use this marker to decide whether to skip due to unavailable Docker.
pub const POSTGRES_CONTAINER_START_ERR_PREFIX: &str = "postgres-container-start:";

/// A SQLite test store living in a temporary directory.
#[allow(dead_code)]
pub struct TestStore {
    sqlite_store: Arc<SqliteStore>,
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestStore {
    pub async fn new() -> StatusResult<Self> {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let store = SqliteStore::new(temp_dir.path().join("status.db")).await?;
        Ok(Self {
            sqlite_store: Arc::new(store),
            _temp_dir: temp_dir,
        })
    }

    pub fn store(&self) -> Arc<dyn StatusStore> {
        self.sqlite_store.clone()
    }

    /// Raw pool for assertions the trait does not expose.
    pub fn pool(&self) -> &Pool<Sqlite> {
        self.sqlite_store.pool()
    }

    pub async fn row_count(&self, study_uid: &str) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM study_status WHERE study_instance_uid = ?")
            .bind(study_uid)
            .fetch_one(self.pool())
            .await
            .expect("count query failed")
    }
}

/// PostgreSQL test store wrapper that manages a testcontainer.
#[allow(dead_code)]
pub struct PostgresTestStore {
    postgres_store: Arc<PostgresStore>,
    _container: ContainerAsync<Postgres>,
}

#[allow(dead_code)]
impl PostgresTestStore {
    pub async fn new() -> StatusResult<Self> {
        let container = Postgres::default()
            .with_tag("15-alpine")
            .start()
            .await
            .map_err(|e| {
                StatusError::Internal(format!(
                    "{} Failed to start PostgreSQL container: {e}",
                    POSTGRES_CONTAINER_START_ERR_PREFIX
                ))
            })?;

        let host = container.get_host().await.expect("Failed to get host");
        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get port");

        // Default credentials from testcontainers-modules postgres
        let url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

        let store = PostgresStore::from_url(
            &url,
            PoolSettings {
                max_connections: 5,
                statement_timeout_ms: Some(5_000),
            },
        ).await?;
        Ok(Self {
            postgres_store: Arc::new(store),
            _container: container,
        })
    }

    pub fn store(&self) -> Arc<dyn StatusStore> {
        self.postgres_store.clone()
    }

    pub fn pool(&self) -> &Pool<SqlxPostgres> {
        self.postgres_store.pool()
    }

    pub async fn row_count(&self, study_uid: &str) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM study_status WHERE study_instance_uid = $1")
            .bind(study_uid)
            .fetch_one(self.pool())
            .await
            .expect("count query failed")
    }
}

/// Try to create a PostgreSQL test store, skipping if Docker is unavailable
/// or SKIP_POSTGRES_TESTS is set.
///
/// Only container-start failures cause a skip. Schema or connection errors
/// still panic so real regressions are not silently swallowed.
#[allow(dead_code)]
pub async fn postgres_or_skip() -> Option<PostgresTestStore> {
    if std::env::var("SKIP_POSTGRES_TESTS").is_ok() {
        return None;
    }
    match PostgresTestStore::new().await {
        Ok(store) => Some(store),
        Err(err) => {
            let msg = err.to_string();
            if msg.contains(POSTGRES_CONTAINER_START_ERR_PREFIX) {
                eprintln!("Skipping PostgreSQL test (Docker unavailable): {msg}");
                None
            } else {
                panic!("PostgreSQL test setup failed: {msg}");
            }
        }
    }
}
