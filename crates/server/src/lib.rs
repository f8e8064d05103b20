//! HTTP API server for Strata.
//!
//! This crate provides the HTTP boundary:
//! - Study status lookup with default materialization
//! - Move requests that record a study's new tier
//! - Tier-gated instance retrieval proxied to the PACS
//! - Health and Prometheus endpoints

pub mod error;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
