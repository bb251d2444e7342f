//! HTTP 请求处理器

pub mod health;
pub mod record;

use crate::error::ApiError;

/// 未匹配任何路由
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
