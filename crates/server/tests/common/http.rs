//! Request helpers driving the router in-process.

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

/// Send a request with an optional JSON body and parse the JSON response.
#[allow(dead_code)]
pub async fn json_request(
    router: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let (builder, body) = match body {
        Some(v) => (
            Request::builder()
                .method(method)
                .uri(uri)
                .header("Content-Type", "application/json"),
            Body::from(serde_json::to_vec(&v).unwrap()),
        ),
        None => (Request::builder().method(method).uri(uri), Body::empty()),
    };

    let (status, _, bytes) = send(router, builder.body(body).unwrap()).await;
    let json: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Send a request with a raw body and return the raw response.
#[allow(dead_code)]
pub async fn raw_request(
    router: &axum::Router,
    method: &str,
    uri: &str,
    body: impl Into<Body>,
) -> (StatusCode, HeaderMap, Bytes) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(body.into())
        .unwrap();
    send(router, request).await
}

/// GET a URI and return the raw response.
#[allow(dead_code)]
pub async fn get_raw(router: &axum::Router, uri: &str) -> (StatusCode, HeaderMap, Bytes) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(router, request).await
}

async fn send(router: &axum::Router, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, bytes)
}
