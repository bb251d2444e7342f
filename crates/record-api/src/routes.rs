//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射以及全局中间件

use axum::{
    Router,
    http::Method,
    middleware,
    routing::get,
};
use record_shared::observability::middleware as obs_middleware;
use tower_http::cors::{Any, CorsLayer};

use crate::{handlers, state::AppState};

/// 记录管理路由
fn record_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(handlers::record::list_records).post(handlers::record::create_record),
        )
        .route(
            "/users/{id}",
            get(handlers::record::get_record)
                .put(handlers::record::update_record)
                .delete(handlers::record::delete_record),
        )
}

/// 跨域配置：允许任意来源
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}

/// 构建完整应用路由
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/api/v1", record_routes())
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::not_found)
        .layer(cors_layer())
        // 可观测性中间件：请求追踪和指标收集
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .with_state(state)
}
