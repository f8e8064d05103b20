//! Upstream PACS client for Strata.
//!
//! The service only talks to the PACS after the access gate has permitted a
//! retrieval. [`PacsClient`] is the seam; [`OrthancClient`] speaks Orthanc's
//! REST API.

pub mod client;
pub mod error;
pub mod types;

pub use client::{DEFAULT_PREVIEW_CONTENT_TYPE, OrthancClient, PacsClient};
pub use error::{PacsError, PacsResult};
pub use types::{
    InstanceDetails, InstanceMainTags, InstancePreview, PatientMainTags, SimplifiedTags,
    StudyDetails, StudyMainTags,
};

use std::sync::Arc;
use strata_core::config::PacsConfig;

/// Create a PACS client from configuration.
pub fn from_config(config: &PacsConfig) -> PacsResult<Arc<dyn PacsClient>> {
    config.validate().map_err(PacsError::Config)?;
    let client = OrthancClient::new(config.base_url.trim(), config.timeout())?;
    tracing::info!(base_url = %client.base_url(), timeout_secs = config.timeout_secs, "PACS client configured");
    Ok(Arc::new(client))
}
