//! API 错误类型定义
//!
//! 服务层的失败类别在这里一对一映射为 HTTP 状态码，适配层不做其他业务判断。

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use record_service::ServiceError;

use crate::dto::ApiResponse;

/// 发生失败的用例，决定响应信封中的 `message`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Action {
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::List => "Failed to retrieve users",
            Self::Get => "User not found",
            Self::Create => "Failed to create user",
            Self::Update => "Failed to update user",
            Self::Delete => "Failed to delete user",
        }
    }
}

/// API 错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("路径参数不是数字: {0}")]
    InvalidPathId(String),

    #[error("请求体无效: {0}")]
    InvalidBody(String),

    #[error("{action:?} 失败: {source}")]
    Service {
        action: Action,
        #[source]
        source: ServiceError,
    },

    #[error("路由不存在")]
    RouteNotFound,
}

impl ApiError {
    pub fn service(action: Action) -> impl FnOnce(ServiceError) -> Self {
        move |source| Self::Service { action, source }
    }

    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidPathId(_) | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::Service { source, .. } => match source {
                ServiceError::InvalidId(_) | ServiceError::InvalidInput(_) => {
                    StatusCode::BAD_REQUEST
                }
                ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::DuplicateEmail(_) => StatusCode::CONFLICT,
                ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// 返回错误码（用于日志）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPathId(_) => "INVALID_PATH_ID",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
            Self::Service { source, .. } => source.code(),
        }
    }

    /// 信封中的 (message, error)
    fn envelope(&self) -> (&'static str, Option<String>) {
        match self {
            Self::InvalidPathId(_) => ("Invalid user ID", Some("ID must be a number".to_string())),
            Self::InvalidBody(detail) => ("Invalid request body", Some(detail.clone())),
            Self::RouteNotFound => ("Route not found", None),
            Self::Service { action, source } => {
                let detail = match source {
                    ServiceError::InvalidId(_) => "invalid user ID".to_string(),
                    ServiceError::InvalidInput(reason) => reason.clone(),
                    ServiceError::NotFound(_) => "user not found".to_string(),
                    ServiceError::DuplicateEmail(_) => "email already exists".to_string(),
                    // 内部错误只返回通用提示，详细信息仅记录日志
                    ServiceError::Internal(_) => "internal server error".to_string(),
                };
                (action.failure_message(), Some(detail))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "请求处理失败");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "请求被拒绝");
        }

        let (message, error) = self.envelope();
        (status, axum::Json(ApiResponse::error(message, error))).into_response()
    }
}

/// 从 JSON 提取失败转换
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_error_variants() -> Vec<(ApiError, StatusCode, &'static str)> {
        vec![
            (ApiError::InvalidPathId("abc".into()), StatusCode::BAD_REQUEST, "Invalid user ID"),
            (ApiError::InvalidBody("EOF".into()), StatusCode::BAD_REQUEST, "Invalid request body"),
            (ApiError::RouteNotFound, StatusCode::NOT_FOUND, "Route not found"),
            (
                ApiError::service(Action::Get)(ServiceError::InvalidId(-1)),
                StatusCode::BAD_REQUEST,
                "User not found",
            ),
            (
                ApiError::service(Action::Create)(ServiceError::InvalidInput("name is required".into())),
                StatusCode::BAD_REQUEST,
                "Failed to create user",
            ),
            (
                ApiError::service(Action::Delete)(ServiceError::NotFound(9)),
                StatusCode::NOT_FOUND,
                "Failed to delete user",
            ),
            (
                ApiError::service(Action::Update)(ServiceError::DuplicateEmail("a@b.io".into())),
                StatusCode::CONFLICT,
                "Failed to update user",
            ),
            (
                ApiError::service(Action::List)(ServiceError::Internal("poisoned".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to retrieve users",
            ),
        ]
    }

    #[test]
    fn test_status_mapping_is_total() {
        for (error, status, message) in all_error_variants() {
            assert_eq!(error.status_code(), status, "{:?}", error);
            assert_eq!(error.envelope().0, message, "{:?}", error);
        }
    }

    #[test]
    fn test_service_kinds_map_to_distinct_codes() {
        let mut codes: Vec<_> = all_error_variants()
            .iter()
            .map(|(e, _, _)| e.error_code())
            .collect();
        let total = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), total);
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let error = ApiError::service(Action::Create)(ServiceError::Internal("id overflow".into()));
        let (_, detail) = error.envelope();
        assert_eq!(detail.as_deref(), Some("internal server error"));
    }

    #[test]
    fn test_invalid_input_reason_is_exposed() {
        let error =
            ApiError::service(Action::Create)(ServiceError::InvalidInput("age must be at least 1".into()));
        let (_, detail) = error.envelope();
        assert_eq!(detail.as_deref(), Some("age must be at least 1"));
    }

    #[tokio::test]
    async fn test_into_response_body() {
        let response = ApiError::InvalidPathId("abc".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "message": "Invalid user ID",
                "error": "ID must be a number"
            })
        );
    }
}
