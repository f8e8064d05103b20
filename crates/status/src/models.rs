//! Database models mapping to the status schema.

use crate::error::{StatusError, StatusResult};
use sqlx::FromRow;
use strata_core::StatusRecord;
use time::OffsetDateTime;

/// Row of the `study_status` table.
#[derive(Debug, Clone, FromRow)]
pub struct StatusRow {
    pub study_instance_uid: String,
    pub tier: String,
    pub location_type: String,
    /// NULL unless `location_type` is "edge". An empty string is a real value.
    pub edge_id: Option<String>,
    pub last_updated: OffsetDateTime,
}

impl StatusRow {
    /// Validate the flat row into a [`StatusRecord`].
    ///
    /// A row violating the edge id invariant is reported as a decode failure.
    pub fn into_record(self) -> StatusResult<StatusRecord> {
        StatusRecord::from_parts(self.tier, &self.location_type, self.edge_id).map_err(|source| {
            StatusError::Decode {
                study_uid: self.study_instance_uid,
                source,
            }
        })
    }
}
