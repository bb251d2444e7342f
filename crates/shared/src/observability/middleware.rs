//! HTTP 中间件
//!
//! 提供请求追踪和指标收集的中间件。

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    http::Method,
    middleware::Next,
    response::Response,
};
use tracing::{Instrument, info, info_span};

use super::metrics;

/// 未命中任何路由时的指标路径标签
const UNMATCHED_ROUTE: &str = "unmatched";

/// 指标用的路由标签：命中路由取路由模板，否则为固定值
fn route_label(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}

/// 指标用的方法标签，非标准方法归为 OTHER
fn method_label(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::POST => "POST",
        Method::PUT => "PUT",
        Method::DELETE => "DELETE",
        Method::PATCH => "PATCH",
        Method::HEAD => "HEAD",
        Method::OPTIONS => "OPTIONS",
        Method::CONNECT => "CONNECT",
        Method::TRACE => "TRACE",
        _ => "OTHER",
    }
}

/// HTTP 请求追踪和指标中间件
///
/// 为每个请求创建追踪 span，记录方法、路径、状态码和耗时。
/// 日志保留原始路径；指标只使用路由模板，避免每个 id 产生一条新序列。
///
/// ```ignore
/// use axum::{Router, middleware};
/// use record_shared::observability::middleware::http_tracing;
///
/// let app = Router::new()
///     .route("/health", get(health))
///     .layer(middleware::from_fn(http_tracing));
/// ```
pub async fn http_tracing(request: Request, next: Next) -> Response {
    let method = method_label(request.method());
    let uri = request.uri().path().to_string();
    let route = route_label(&request);

    let span = info_span!(
        "http_request",
        method = %method,
        uri = %uri,
        route = %route,
        status = tracing::field::Empty,
        latency_ms = tracing::field::Empty,
    );

    let start = Instant::now();

    let response = next.run(request).instrument(span.clone()).await;

    let latency = start.elapsed();
    let status = response.status().as_u16();

    span.record("status", status);
    span.record("latency_ms", latency.as_millis() as i64);

    span.in_scope(|| {
        info!(
            method = %method,
            uri = %uri,
            status,
            latency_ms = latency.as_millis() as u64,
            "request completed"
        );
    });

    metrics::record_http_request(method, &route, status, latency.as_secs_f64());

    response
}
