//! Durable per-study status store for Strata.
//!
//! This crate is the system of record for where each study's data lives:
//! - One status row per study, replaced atomically via upsert
//! - SQLite and PostgreSQL backends behind the [`StatusStore`] trait
//! - Default materialization for studies seen for the first time

pub mod error;
pub mod materialize;
pub mod models;
pub mod postgres;
pub mod repos;
pub mod store;

pub use error::{StatusError, StatusResult};
pub use materialize::{Origin, ResolvedStatus, resolve_status};
pub use postgres::{PoolSettings, PostgresStore};
pub use repos::StatusRepo;
pub use store::{SqliteStore, StatusStore};

use std::sync::Arc;
use strata_core::config::StatusStoreConfig;

/// Create a status store from configuration.
pub async fn from_config(config: &StatusStoreConfig) -> StatusResult<Arc<dyn StatusStore>> {
    config.validate().map_err(StatusError::Config)?;

    match config {
        StatusStoreConfig::Sqlite { path } => {
            let store = SqliteStore::new(path).await?;
            Ok(Arc::new(store) as Arc<dyn StatusStore>)
        }
        StatusStoreConfig::Postgres { .. } => {
            let (opts, settings) = postgres::connect_options(config)?;
            let store = PostgresStore::connect(opts, settings).await?;
            Ok(Arc::new(store) as Arc<dyn StatusStore>)
        }
    }
}
