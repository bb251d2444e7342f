//! 记录管理 API 处理器
//!
//! 实现记录的 CRUD 操作

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use record_service::{CreateRecordRequest, Record, UpdateRecordRequest};

use crate::{
    dto::ApiResponse,
    error::{Action, ApiError},
    state::AppState,
};

/// 解析路径中的记录 ID
///
/// 只校验是否为整数，非正数交给服务层按 InvalidId 处理。
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::InvalidPathId(raw.to_string()))
}

/// 获取记录列表
///
/// GET /api/v1/users
pub async fn list_records(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Record>>>, ApiError> {
    let records = state
        .records
        .list_all()
        .map_err(ApiError::service(Action::List))?;

    Ok(Json(ApiResponse::success(
        records,
        "Users retrieved successfully",
    )))
}

/// 获取记录详情
///
/// GET /api/v1/users/{id}
pub async fn get_record(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<Record>>, ApiError> {
    let id = parse_id(&raw_id)?;
    let record = state
        .records
        .get_by_id(id)
        .map_err(ApiError::service(Action::Get))?;

    Ok(Json(ApiResponse::success(record, "User found")))
}

/// 创建记录
///
/// POST /api/v1/users
pub async fn create_record(
    State(state): State<AppState>,
    payload: Result<Json<CreateRecordRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Record>>), ApiError> {
    let Json(req) = payload?;
    let record = state
        .records
        .create(req)
        .map_err(ApiError::service(Action::Create))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(record, "User created successfully")),
    ))
}

/// 更新记录
///
/// PUT /api/v1/users/{id}
pub async fn update_record(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateRecordRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Record>>, ApiError> {
    let id = parse_id(&raw_id)?;
    let Json(req) = payload?;
    let record = state
        .records
        .update(id, req)
        .map_err(ApiError::service(Action::Update))?;

    Ok(Json(ApiResponse::success(record, "User updated successfully")))
}

/// 删除记录，响应体携带被删除的记录
///
/// DELETE /api/v1/users/{id}
pub async fn delete_record(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<Record>>, ApiError> {
    let id = parse_id(&raw_id)?;
    let record = state
        .records
        .delete(id)
        .map_err(ApiError::service(Action::Delete))?;

    Ok(Json(ApiResponse::success(record, "User deleted successfully")))
}
