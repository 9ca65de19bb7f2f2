use axum::Router;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod meta;
pub mod crud;
pub mod gerenciamento;
pub mod atividades;
pub mod reservas;
#[cfg(test)]
pub(crate) mod testing;

/// Merge the service routes with `/`, `/status`, `/metrics` and wrap them in CORS + tracing.
pub fn finish(service: &'static str, prefixes: &[&str], routes: Router) -> Router {
    routes
        .merge(meta::router(service, prefixes))
        .layer(CorsLayer::very_permissive())
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
