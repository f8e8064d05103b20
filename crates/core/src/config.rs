//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Deadline applied to every inbound request, in seconds.
    /// Store queries and PACS calls still in flight when it expires are cancelled.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Enable the /metrics endpoint for Prometheus scraping (default: true).
    /// SECURITY: When enabled, ensure this endpoint is network-restricted
    /// to authorized Prometheus scraper IPs only at the infrastructure level.
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
    /// Allow cross-origin requests from any origin (browser viewer frontends).
    #[serde(default = "default_cors_allow_any_origin")]
    pub cors_allow_any_origin: bool,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_metrics_enabled() -> bool {
    true
}

fn default_cors_allow_any_origin() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            request_timeout_secs: default_request_timeout_secs(),
            metrics_enabled: default_metrics_enabled(),
            cors_allow_any_origin: default_cors_allow_any_origin(),
        }
    }
}

impl ServerConfig {
    /// Get the request deadline as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate server configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.request_timeout_secs == 0 {
            return Err("server.request_timeout_secs cannot be 0".to_string());
        }
        Ok(())
    }
}

/// PostgreSQL SSL mode configuration.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PgSslMode {
    /// Disable SSL/TLS entirely.
    Disable,
    /// Prefer SSL/TLS but allow unencrypted connections (default).
    #[default]
    Prefer,
    /// Require SSL/TLS for all connections.
    Require,
}

/// Status store configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StatusStoreConfig {
    /// SQLite database (recommended for testing and single-node deployments only).
    Sqlite {
        /// Database file path.
        path: PathBuf,
    },
    /// PostgreSQL database.
    Postgres {
        /// Connection URL (optional if using individual fields).
        /// Takes precedence over individual fields if both are provided.
        url: Option<String>,
        /// Database host (e.g., "localhost" or "db.example.com").
        host: Option<String>,
        /// Database port (default: 5432).
        #[serde(default = "default_pg_port")]
        port: Option<u16>,
        /// Database username.
        username: Option<String>,
        /// Database password.
        /// WARNING: Prefer STRATA_STORE__PASSWORD env var over storing in config.
        password: Option<String>,
        /// Database name.
        database: Option<String>,
        /// SSL mode for connections.
        ssl_mode: Option<PgSslMode>,
        /// Maximum connections in the pool. Bounds concurrent store operations.
        #[serde(default = "default_max_connections")]
        max_connections: u32,
        /// Statement timeout in milliseconds (prevents hung queries).
        #[serde(default = "default_statement_timeout_ms")]
        statement_timeout_ms: Option<u64>,
    },
}

fn default_max_connections() -> u32 {
    10
}

fn default_pg_port() -> Option<u16> {
    Some(5432)
}

fn default_statement_timeout_ms() -> Option<u64> {
    Some(10_000)
}

impl Default for StatusStoreConfig {
    fn default() -> Self {
        Self::Sqlite {
            path: PathBuf::from("./data/status.db"),
        }
    }
}

impl StatusStoreConfig {
    /// Validate status store configuration invariants.
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            StatusStoreConfig::Sqlite { .. } => Ok(()),
            StatusStoreConfig::Postgres {
                url,
                host,
                database,
                max_connections,
                ..
            } => {
                if *max_connections == 0 {
                    return Err("postgres max_connections must be at least 1".to_string());
                }
                // Must have either url OR (host + database)
                match (url.as_ref(), host.as_ref(), database.as_ref()) {
                    (Some(_), _, _) => Ok(()),
                    (None, Some(_), Some(_)) => Ok(()),
                    (None, None, _) => Err(
                        "postgres config requires either 'url' or 'host' + 'database'".to_string(),
                    ),
                    (None, Some(_), None) => Err(
                        "postgres config requires 'database' when using individual fields"
                            .to_string(),
                    ),
                }
            }
        }
    }
}

/// Upstream PACS (Orthanc) client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PacsConfig {
    /// Base URL of the Orthanc REST API.
    #[serde(default = "default_pacs_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds for upstream calls.
    #[serde(default = "default_pacs_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_pacs_base_url() -> String {
    "http://pacs-app-orthanc.default.svc.cluster.local:8042".to_string()
}

fn default_pacs_timeout_secs() -> u64 {
    15
}

impl Default for PacsConfig {
    fn default() -> Self {
        Self {
            base_url: default_pacs_base_url(),
            timeout_secs: default_pacs_timeout_secs(),
        }
    }
}

impl PacsConfig {
    /// Get the upstream timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate PACS client configuration.
    pub fn validate(&self) -> Result<(), String> {
        let base_url = self.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(format!(
                "pacs.base_url must be an http(s) URL, got '{}'",
                self.base_url
            ));
        }
        if self.timeout_secs == 0 {
            return Err("pacs.timeout_secs cannot be 0".to_string());
        }
        Ok(())
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Status store configuration.
    #[serde(default)]
    pub store: StatusStoreConfig,
    /// Upstream PACS configuration.
    #[serde(default)]
    pub pacs: PacsConfig,
}

impl AppConfig {
    /// Create a test configuration with sensible defaults.
    ///
    /// **For testing only.** Uses SQLite and a local PACS URL.
    pub fn for_testing() -> Self {
        Self {
            server: ServerConfig::default(),
            store: StatusStoreConfig::default(),
            pacs: PacsConfig {
                base_url: "http://127.0.0.1:8042".to_string(),
                timeout_secs: 5,
            },
        }
    }

    /// Validate every section, returning the first error found.
    pub fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.store.validate()?;
        self.pacs.validate()
    }
}
