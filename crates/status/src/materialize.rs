//! Default status materialization for studies the store has never seen.
//!
//! The first read of an unknown study persists the default record through the
//! store's atomic upsert. Concurrent first reads race harmlessly: every writer
//! stores the same default and the table still holds a single row.

use crate::error::StatusResult;
use crate::repos::StatusRepo;
use strata_core::StatusRecord;

/// How a resolved status was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    /// Read from the store.
    Stored,
    /// No record existed; the default was written.
    Materialized,
    /// No record existed and writing the default failed.
    /// The default is still served; the next read retries the write.
    Unpersisted,
}

/// A study status together with how it was obtained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedStatus {
    pub record: StatusRecord,
    pub origin: Origin,
}

/// Resolve the current status of a study, materializing the default when absent.
///
/// A failing read is returned as an error: "not found" is never assumed.
/// A failing default write is logged and the default is returned anyway.
pub async fn resolve_status<S>(store: &S, study_uid: &str) -> StatusResult<ResolvedStatus>
where
    S: StatusRepo + ?Sized,
{
    if let Some(record) = store.get_status(study_uid).await? {
        return Ok(ResolvedStatus {
            record,
            origin: Origin::Stored,
        });
    }

    let record = StatusRecord::default_for_new_study();
    match store.set_status(study_uid, &record).await {
        Ok(()) => {
            tracing::info!(study_uid = %study_uid, "Set default 'hot' status for new study");
            Ok(ResolvedStatus {
                record,
                origin: Origin::Materialized,
            })
        }
        Err(e) => {
            tracing::warn!(
                study_uid = %study_uid,
                error = %e,
                "Failed to persist default status for new study, serving default"
            );
            Ok(ResolvedStatus {
                record,
                origin: Origin::Unpersisted,
            })
        }
    }
}
