//! Study listing endpoint.

use crate::error::ApiResult;
use crate::metrics::UPSTREAM_ERRORS;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use strata_pacs::StudyDetails;

/// GET /api/v1/studies - List studies known to the PACS with their details.
///
/// Studies whose details cannot be fetched are logged and left out.
pub async fn list_studies(State(state): State<AppState>) -> ApiResult<Json<Vec<StudyDetails>>> {
    let study_ids = state.pacs.list_studies().await.inspect_err(|e| {
        tracing::error!(error = %e, "Failed to list studies from PACS");
        UPSTREAM_ERRORS.with_label_values(&[e.kind()]).inc();
    })?;

    let mut studies = Vec::with_capacity(study_ids.len());
    for study_id in &study_ids {
        match state.pacs.get_study_details(study_id).await {
            Ok(details) => studies.push(details),
            Err(e) => {
                tracing::warn!(study_id = %study_id, error = %e, "Failed to get study details, skipping");
            }
        }
    }

    tracing::info!(
        listed = study_ids.len(),
        returned = studies.len(),
        "Retrieved study list"
    );
    Ok(Json(studies))
}
