use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use common::types::{ServiceIndex, Status};
use service::observability::encode_metrics;

pub fn router(service: &'static str, prefixes: &[&str]) -> Router {
    let mut endpoints = vec!["/status".to_string(), "/metrics".to_string()];
    endpoints.extend(prefixes.iter().map(|p| p.to_string()));
    let index = ServiceIndex { service: service.to_string(), endpoints };

    Router::new()
        .route("/", get(move || async move { Json(index) }))
        .route("/status", get(move || async move { Json(Status::ok(service)) }))
        .route("/metrics", get(metrics))
}

async fn metrics() -> impl IntoResponse {
    match encode_metrics() {
        Ok(body) => (StatusCode::OK, body),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}
