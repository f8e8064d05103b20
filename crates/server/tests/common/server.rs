//! Server test utilities.

use crate::common::pacs::FakePacs;
use std::sync::Arc;
use strata_core::config::{AppConfig, StatusStoreConfig};
use strata_core::{MoveRequest, StatusRecord};
use strata_pacs::PacsClient;
use strata_server::{AppState, create_router};
use strata_status::{SqliteStore, StatusStore};
use tempfile::TempDir;

/// A test server wrapper with all dependencies.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
    pub pacs: Arc<FakePacs>,
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a new test server backed by a temporary SQLite store.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test server with custom config modifications.
    pub async fn with_config<F>(modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("status.db");
        let store: Arc<dyn StatusStore> = Arc::new(
            SqliteStore::new(&db_path)
                .await
                .expect("Failed to create status store"),
        );

        let mut config = AppConfig::for_testing();
        config.store = StatusStoreConfig::Sqlite { path: db_path };
        modifier(&mut config);

        Self::build(config, store, temp_dir)
    }

    /// Create a test server around a specific status store.
    pub async fn with_store(store: Arc<dyn StatusStore>) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        Self::build(AppConfig::for_testing(), store, temp_dir)
    }

    /// A fresh SQLite store in its own directory, for wrapping in doubles.
    pub async fn sqlite_store(temp_dir: &TempDir) -> Arc<dyn StatusStore> {
        Arc::new(
            SqliteStore::new(temp_dir.path().join("status.db"))
                .await
                .expect("Failed to create status store"),
        )
    }

    fn build(config: AppConfig, store: Arc<dyn StatusStore>, temp_dir: TempDir) -> Self {
        let pacs = Arc::new(FakePacs::new());
        let state = AppState::new(config, store, pacs.clone() as Arc<dyn PacsClient>);
        let router = create_router(state.clone());

        Self {
            router,
            state,
            pacs,
            _temp_dir: temp_dir,
        }
    }

    /// Get access to the underlying status store.
    pub fn store(&self) -> Arc<dyn StatusStore> {
        self.state.store.clone()
    }

    /// Record a status directly, bypassing the HTTP layer.
    pub async fn set_tier(&self, study_uid: &str, tier: &str, location: Option<&str>) -> StatusRecord {
        let record = MoveRequest::new(tier, location).resolve().record;
        self.store()
            .set_status(study_uid, &record)
            .await
            .expect("Failed to set status");
        record
    }
}
