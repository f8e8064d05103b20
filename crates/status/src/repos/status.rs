//! Study status repository trait.

use crate::error::StatusResult;
use crate::models::StatusRow;
use async_trait::async_trait;
use strata_core::StatusRecord;

/// Repository for per-study status records.
#[async_trait]
pub trait StatusRepo: Send + Sync {
    /// Get the raw stored row for a study, including its last update time.
    async fn get_status_row(&self, study_uid: &str) -> StatusResult<Option<StatusRow>>;

    /// Insert or fully replace the status of a study in one atomic statement.
    ///
    /// Concurrent calls for the same study never create duplicate rows; the
    /// last committed write wins. `last_updated` is stamped by the database clock
    /// on every call.
    async fn set_status(&self, study_uid: &str, status: &StatusRecord) -> StatusResult<()>;

    /// Get the status of a study.
    ///
    /// Returns `Ok(None)` when no record exists. Errors are reserved for
    /// connectivity and decode failures.
    async fn get_status(&self, study_uid: &str) -> StatusResult<Option<StatusRecord>> {
        self.get_status_row(study_uid)
            .await?
            .map(|row| row.into_record())
            .transpose()
    }
}
