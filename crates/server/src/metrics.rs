//! Prometheus metrics for the Strata server.
//!
//! Exposes counters for status materialization, access gate denials and
//! upstream PACS failures, plus status store latency.
//!
//! # Security Note
//!
//! The `/metrics` endpoint is unauthenticated to allow Prometheus scraping.
//! Metrics carry no study identifiers, only aggregate counts.
//!
//! **Deployment Requirement**: The `/metrics` endpoint MUST be network-restricted
//! to authorized Prometheus scraper IPs only. Do NOT expose `/metrics` on
//! public networks.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::{LazyLock, Once};
use std::time::Instant;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

// Status metrics
pub static STATUS_MATERIALIZATIONS: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "strata_status_materializations_total",
        "Total number of default statuses written for first-seen studies",
    )
    .expect("metric creation failed")
});

pub static STATUS_MATERIALIZATION_FAILURES: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "strata_status_materialization_failures_total",
        "Total number of default statuses served without being persisted",
    )
    .expect("metric creation failed")
});

pub static STATUS_MOVES: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "strata_status_moves_total",
        "Total number of accepted move requests",
    )
    .expect("metric creation failed")
});

// Gate metrics
pub static GATE_DENIALS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "strata_gate_denials_total",
            "Total retrievals refused because the study is not hot, by operation",
        ),
        &["operation"],
    )
    .expect("metric creation failed")
});

// Upstream metrics
pub static UPSTREAM_ERRORS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "strata_upstream_errors_total",
            "Total PACS call failures by error kind",
        ),
        &["kind"],
    )
    .expect("metric creation failed")
});

// Timing metrics
pub static STORE_OPERATION_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "strata_store_operation_duration_seconds",
            "Time taken by status store operations",
        )
        .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]),
        &["operation"],
    )
    .expect("metric creation failed")
});

/// Guard to ensure metrics are only registered once.
static REGISTER_ONCE: Once = Once::new();

/// Register all metrics with the global registry.
/// Safe to call multiple times.
pub fn register_metrics() {
    REGISTER_ONCE.call_once(|| {
        REGISTRY
            .register(Box::new(STATUS_MATERIALIZATIONS.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(STATUS_MATERIALIZATION_FAILURES.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(STATUS_MOVES.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(GATE_DENIALS.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(UPSTREAM_ERRORS.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(STORE_OPERATION_DURATION.clone()))
            .expect("metric registration failed");
    });
}

/// Records the elapsed time of a store operation when dropped.
///
/// Dropping also covers requests cancelled by the deadline mid-operation.
pub struct StoreTimer {
    operation: &'static str,
    started: Instant,
}

impl StoreTimer {
    pub fn start(operation: &'static str) -> Self {
        Self {
            operation,
            started: Instant::now(),
        }
    }
}

impl Drop for StoreTimer {
    fn drop(&mut self) {
        STORE_OPERATION_DURATION
            .with_label_values(&[self.operation])
            .observe(self.started.elapsed().as_secs_f64());
    }
}

/// Handler for GET /metrics.
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            buffer,
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {e}").into_bytes(),
        ),
    }
}
