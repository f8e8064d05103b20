//! Route configuration.

use crate::handlers;
use crate::metrics::metrics_handler;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Upstream listings (not gated)
        .route("/api/v1/studies", get(handlers::list_studies))
        .route(
            "/api/v1/studies/{study_uid}/instances",
            get(handlers::list_instances),
        )
        // Study status
        .route(
            "/api/v1/studies/{study_uid}/location",
            get(handlers::get_study_status),
        )
        .route(
            "/api/v1/studies/{study_uid}/move",
            post(handlers::move_study),
        )
        // Gated retrieval
        .route(
            "/api/v1/studies/{study_uid}/instances/{instance_uid}/preview",
            get(handlers::get_instance_preview),
        )
        .route(
            "/api/v1/studies/{study_uid}/instances/{instance_uid}/simplified-tags",
            get(handlers::get_instance_simplified_tags),
        )
        .route(
            "/api/v1/studies/{study_uid}/instances/{instance_uid}/file",
            get(handlers::get_instance_file),
        );

    let mut router = Router::new()
        // Health check (unauthenticated for load balancers/k8s probes)
        .route("/healthz", get(handlers::health_check))
        .merge(api_routes);

    // SECURITY: When enabled, this endpoint MUST be network-restricted
    // to authorized Prometheus scraper IPs only.
    if state.config.server.metrics_enabled {
        router = router.route("/metrics", get(metrics_handler));
    }

    // Dropping the handler future on expiry cancels in-flight store and PACS calls.
    router = router.layer(TimeoutLayer::new(state.config.server.request_timeout()));

    if state.config.server.cors_allow_any_origin {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
