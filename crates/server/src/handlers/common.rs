//! Shared handler helpers.

use crate::error::{ApiError, ApiResult};
use crate::metrics::{
    GATE_DENIALS, STATUS_MATERIALIZATION_FAILURES, STATUS_MATERIALIZATIONS, StoreTimer,
    UPSTREAM_ERRORS,
};
use crate::state::AppState;
use std::future::Future;
use strata_core::gate::{self, GateDecision};
use strata_core::{Retrieval, StatusRecord};
use strata_pacs::PacsResult;
use strata_status::{Origin, resolve_status};

/// Reject blank path identifiers before touching the store or the PACS.
///
/// Identifiers are opaque: a non-blank value is returned exactly as received.
pub fn require_id<'a>(value: &'a str, name: &str) -> ApiResult<&'a str> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("missing {name}")));
    }
    Ok(value)
}

/// Current status of a study, materializing the default on first sight.
pub async fn current_status(state: &AppState, study_uid: &str) -> ApiResult<StatusRecord> {
    let resolved = {
        let _timer = StoreTimer::start("resolve");
        resolve_status(state.store.as_ref(), study_uid).await
    };
    let resolved = resolved.map_err(|e| {
        tracing::error!(study_uid = %study_uid, error = %e, "Failed to read study status");
        ApiError::from(e)
    })?;

    match resolved.origin {
        Origin::Stored => {}
        Origin::Materialized => STATUS_MATERIALIZATIONS.inc(),
        Origin::Unpersisted => STATUS_MATERIALIZATION_FAILURES.inc(),
    }
    Ok(resolved.record)
}

/// Run `fetch` against the PACS only if the study's tier permits `retrieval`.
///
/// On denial the PACS is never contacted and the current status is returned
/// in the error. On permit `fetch` runs exactly once and its error is passed
/// through.
pub async fn gated_fetch<T, F, Fut>(
    state: &AppState,
    study_uid: &str,
    instance_uid: &str,
    retrieval: Retrieval,
    fetch: F,
) -> ApiResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = PacsResult<T>>,
{
    let record = current_status(state, study_uid).await?;

    if let GateDecision::Deny(status) = gate::evaluate(record) {
        tracing::info!(
            study_uid = %study_uid,
            instance_uid = %instance_uid,
            operation = %retrieval,
            tier = %status.tier,
            "Retrieval refused, study not hot"
        );
        GATE_DENIALS.with_label_values(&[retrieval.as_str()]).inc();
        return Err(ApiError::PreconditionFailed { retrieval, status });
    }

    tracing::info!(
        study_uid = %study_uid,
        instance_uid = %instance_uid,
        operation = %retrieval,
        "Fetching from PACS"
    );
    fetch().await.map_err(|e| {
        tracing::error!(
            study_uid = %study_uid,
            instance_uid = %instance_uid,
            operation = %retrieval,
            error = %e,
            "PACS retrieval failed"
        );
        UPSTREAM_ERRORS.with_label_values(&[e.kind()]).inc();
        ApiError::from(e)
    })
}
