//! Study status endpoints.

use crate::error::{ApiError, ApiResult};
use crate::handlers::common::{current_status, require_id};
use crate::metrics::{STATUS_MOVES, StoreTimer};
use crate::state::AppState;
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;
use strata_core::{MoveRequest, StatusRecord};

/// GET /api/v1/studies/{study_uid}/location - Current tier and location of a study.
pub async fn get_study_status(
    State(state): State<AppState>,
    Path(study_uid): Path<String>,
) -> ApiResult<Json<StatusRecord>> {
    let study_uid = require_id(&study_uid, "study UID")?;
    let record = current_status(&state, study_uid).await?;
    Ok(Json(record))
}

/// Response to an accepted move request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    pub message: &'static str,
    pub current_status: StatusRecord,
}

/// POST /api/v1/studies/{study_uid}/move - Record a study's new tier.
///
/// Only the status is updated; moving the data itself happens elsewhere.
pub async fn move_study(
    State(state): State<AppState>,
    Path(study_uid): Path<String>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<MoveResponse>)> {
    let study_uid = require_id(&study_uid, "study UID")?;
    let request: MoveRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("invalid move request: {e}")))?;
    request.validate()?;

    let transition = request.resolve();
    if transition.ambiguous {
        tracing::warn!(
            study_uid = %study_uid,
            target_tier = %request.target_tier,
            "Move to hot without target location, location recorded as unknown"
        );
    }

    let written = {
        let _timer = StoreTimer::start("set");
        state
            .store
            .set_status(study_uid, &transition.record)
            .await
    };
    written.map_err(|e| {
        tracing::error!(study_uid = %study_uid, error = %e, "Failed to update study status");
        ApiError::from(e)
    })?;

    STATUS_MOVES.inc();
    tracing::info!(
        study_uid = %study_uid,
        tier = %transition.record.tier,
        location_type = transition.record.location_type().as_str(),
        edge_id = ?transition.record.edge_id(),
        "Study status updated"
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(MoveResponse {
            message: "Move request received and status updated.",
            current_status: transition.record,
        }),
    ))
}
