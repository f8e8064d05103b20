//! Health endpoint.

use crate::metrics::StoreTimer;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /healthz - Report whether the status store is reachable.
pub async fn health_check(State(state): State<AppState>) -> Response {
    let result = {
        let _timer = StoreTimer::start("ping");
        state.store.health_check().await
    };

    match result {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                database: "connected",
                version: Some(env!("CARGO_PKG_VERSION")),
                error: None,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Status store health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "error",
                    database: "unavailable",
                    version: None,
                    error: Some(e.to_string()),
                }),
            )
                .into_response()
        }
    }
}
