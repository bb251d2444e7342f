//! 记录服务错误类型

use thiserror::Error;

/// 存储层错误
///
/// NotFound 是正常的查询结果，调用方应与其他错误区分处理。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("记录不存在: {0}")]
    NotFound(i64),

    #[error("邮箱对应的记录不存在: {0}")]
    EmailNotFound(String),

    #[error("记录 ID 已耗尽")]
    IdExhausted,
}

/// 服务层错误
///
/// 服务层是唯一负责失败分类的位置；适配层只做分类到状态码的映射。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("无效的记录 ID: {0}")]
    InvalidId(i64),

    #[error("{0}")]
    InvalidInput(String),

    #[error("记录不存在: {0}")]
    NotFound(i64),

    #[error("邮箱已存在: {0}")]
    DuplicateEmail(String),

    #[error("内部错误: {0}")]
    Internal(String),
}

impl ServiceError {
    /// 稳定的错误码，用于日志、指标和响应体
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId(_) => "INVALID_ID",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::DuplicateEmail(_) => "DUPLICATE_EMAIL",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 是否为调用方可预期的业务失败（而非内部故障）
    pub fn is_expected(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            StoreError::EmailNotFound(_) | StoreError::IdExhausted => {
                Self::Internal(err.to_string())
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
