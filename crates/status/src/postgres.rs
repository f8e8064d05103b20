//! PostgreSQL-based status store implementation.

use crate::error::{StatusError, StatusResult};
use crate::models::StatusRow;
use crate::repos::StatusRepo;
use crate::store::{StatusStore, schema_statements};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode as SqlxPgSslMode};
use sqlx::{Pool, Postgres};
use std::str::FromStr;
use strata_core::StatusRecord;
use strata_core::config::{PgSslMode, StatusStoreConfig};

/// PostgreSQL schema (embedded).
const POSTGRES_SCHEMA: &str = include_str!("postgres_schema.sql");

const DEFAULT_PG_PORT: u16 = 5432;

/// Pool sizing and per-statement limits for a PostgreSQL store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolSettings {
    /// Upper bound on concurrent store operations.
    pub max_connections: u32,
    /// Server-side `statement_timeout`, if any.
    pub statement_timeout_ms: Option<u64>,
}

/// Build connection options and pool settings from the store configuration.
///
/// A connection URL takes precedence over the individual host fields.
pub fn connect_options(config: &StatusStoreConfig) -> StatusResult<(PgConnectOptions, PoolSettings)> {
    let StatusStoreConfig::Postgres {
        url,
        host,
        port,
        username,
        password,
        database,
        ssl_mode,
        max_connections,
        statement_timeout_ms,
    } = config
    else {
        return Err(StatusError::Config(
            "status store is not configured for postgres".to_string(),
        ));
    };

    let opts = match (url, host, database) {
        (Some(url), _, _) => PgConnectOptions::from_str(url)?,
        (None, Some(host), Some(database)) => {
            let mut opts = PgConnectOptions::new()
                .host(host)
                .port(port.unwrap_or(DEFAULT_PG_PORT))
                .database(database);
            if let Some(user) = username {
                opts = opts.username(user);
            }
            if let Some(pass) = password {
                opts = opts.password(pass);
            }
            if let Some(mode) = ssl_mode {
                opts = opts.ssl_mode(sqlx_ssl_mode(*mode));
            }
            opts
        }
        _ => {
            return Err(StatusError::Config(
                "postgres config requires either 'url' or 'host' + 'database'".to_string(),
            ));
        }
    };

    let settings = PoolSettings {
        max_connections: *max_connections,
        statement_timeout_ms: *statement_timeout_ms,
    };
    Ok((opts, settings))
}

fn sqlx_ssl_mode(mode: PgSslMode) -> SqlxPgSslMode {
    match mode {
        PgSslMode::Disable => SqlxPgSslMode::Disable,
        PgSslMode::Prefer => SqlxPgSslMode::Prefer,
        PgSslMode::Require => SqlxPgSslMode::Require,
    }
}

/// PostgreSQL-based status store.
pub struct PostgresStore {
    pool: Pool<Postgres>,
}

impl PostgresStore {
    /// Connect using a connection URL.
    pub async fn from_url(url: &str, settings: PoolSettings) -> StatusResult<Self> {
        Self::connect(PgConnectOptions::from_str(url)?, settings).await
    }

    /// Open a pool with the given options and create the schema.
    pub async fn connect(opts: PgConnectOptions, settings: PoolSettings) -> StatusResult<Self> {
        let opts = match settings.statement_timeout_ms {
            Some(ms) => opts.options([("statement_timeout", format!("{ms}ms"))]),
            None => opts,
        };

        tracing::info!(
            host = opts.get_host(),
            port = opts.get_port(),
            database = ?opts.get_database(),
            max_connections = settings.max_connections,
            statement_timeout_ms = ?settings.statement_timeout_ms,
            "Connecting status store to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_with(opts)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }
}

#[async_trait]
impl StatusStore for PostgresStore {
    async fn migrate(&self) -> StatusResult<()> {
        // PostgreSQL doesn't allow multiple statements in a single prepared statement,
        // so we split the schema and execute each statement separately.
        for statement in schema_statements(POSTGRES_SCHEMA) {
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
impl StatusRepo for PostgresStore {
    async fn get_status_row(&self, study_uid: &str) -> StatusResult<Option<StatusRow>> {
        tracing::debug!(study_uid = %study_uid, "Querying study status");
        let row = sqlx::query_as::<_, StatusRow>(
            r#"
            SELECT study_instance_uid, tier, location_type, edge_id, last_updated
            FROM study_status
            WHERE study_instance_uid = $1
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
            VALUES ($1, $2, $3, $4, CURRENT_TIMESTAMP)
            ON CONFLICT (study_instance_uid) DO UPDATE SET
                tier = EXCLUDED.tier,
                location_type = EXCLUDED.location_type,
                edge_id = EXCLUDED.edge_id,
                last_updated = EXCLUDED.last_updated
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
