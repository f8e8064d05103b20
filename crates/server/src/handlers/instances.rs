//! Instance endpoints: ungated listing and tier-gated retrieval.

use crate::error::ApiResult;
use crate::handlers::common::{gated_fetch, require_id};
use crate::metrics::UPSTREAM_ERRORS;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use strata_core::Retrieval;
use strata_pacs::{InstanceDetails, SimplifiedTags};

/// Content type of raw instance downloads.
pub const DICOM_CONTENT_TYPE: &str = "application/dicom";

/// GET /api/v1/studies/{study_uid}/instances - List a study's instances (not gated).
pub async fn list_instances(
    State(state): State<AppState>,
    Path(study_uid): Path<String>,
) -> ApiResult<Json<Vec<InstanceDetails>>> {
    let study_uid = require_id(&study_uid, "study UID")?;
    let instances = state
        .pacs
        .get_study_instances(study_uid)
        .await
        .inspect_err(|e| {
            tracing::error!(study_uid = %study_uid, error = %e, "Failed to list study instances");
            UPSTREAM_ERRORS.with_label_values(&[e.kind()]).inc();
        })?;
    tracing::debug!(study_uid = %study_uid, count = instances.len(), "Listed study instances");
    Ok(Json(instances))
}

/// GET /api/v1/studies/{study_uid}/instances/{instance_uid}/preview
pub async fn get_instance_preview(
    State(state): State<AppState>,
    Path((study_uid, instance_uid)): Path<(String, String)>,
) -> ApiResult<Response> {
    let study_uid = require_id(&study_uid, "study UID")?;
    let instance_uid = require_id(&instance_uid, "instance UID")?;

    let preview = gated_fetch(&state, study_uid, instance_uid, Retrieval::Preview, || {
        state.pacs.get_instance_preview(instance_uid)
    })
    .await?;

    Ok(([(header::CONTENT_TYPE, preview.content_type)], preview.data).into_response())
}

/// GET /api/v1/studies/{study_uid}/instances/{instance_uid}/simplified-tags
pub async fn get_instance_simplified_tags(
    State(state): State<AppState>,
    Path((study_uid, instance_uid)): Path<(String, String)>,
) -> ApiResult<Json<SimplifiedTags>> {
    let study_uid = require_id(&study_uid, "study UID")?;
    let instance_uid = require_id(&instance_uid, "instance UID")?;

    let tags = gated_fetch(
        &state,
        study_uid,
        instance_uid,
        Retrieval::SimplifiedTags,
        || state.pacs.get_instance_simplified_tags(instance_uid),
    )
    .await?;

    Ok(Json(tags))
}

/// GET /api/v1/studies/{study_uid}/instances/{instance_uid}/file - Download the DICOM file.
pub async fn get_instance_file(
    State(state): State<AppState>,
    Path((study_uid, instance_uid)): Path<(String, String)>,
) -> ApiResult<Response> {
    let study_uid = require_id(&study_uid, "study UID")?;
    let instance_uid = require_id(&instance_uid, "instance UID")?;

    let data = gated_fetch(&state, study_uid, instance_uid, Retrieval::File, || {
        state.pacs.get_instance_file(instance_uid)
    })
    .await?;

    let disposition = format!(
        "attachment; filename=\"{}.dcm\"",
        attachment_stem(instance_uid)
    );
    Ok((
        [
            (header::CONTENT_TYPE, DICOM_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        data,
    )
        .into_response())
}

/// Keep only characters safe inside a quoted Content-Disposition filename.
fn attachment_stem(instance_uid: &str) -> String {
    instance_uid
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
