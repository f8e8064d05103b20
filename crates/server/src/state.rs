//! Application state shared across handlers.

use std::sync::Arc;
use strata_core::config::AppConfig;
use strata_pacs::PacsClient;
use strata_status::StatusStore;

/// Shared application state.
///
/// Every field is reference counted; cloning per request is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// System of record for study status.
    pub store: Arc<dyn StatusStore>,
    /// Upstream PACS client, only called after the access gate permits.
    pub pacs: Arc<dyn PacsClient>,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: AppConfig, store: Arc<dyn StatusStore>, pacs: Arc<dyn PacsClient>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            pacs,
        }
    }
}
