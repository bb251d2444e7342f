//! 规则引擎错误类型
//!
//! 仅在严格编译模式下产生；宽松模式会忽略无法识别的约束。

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("规则解析失败: {0}")]
    ParseError(String),

    #[error("未知的约束: '{token}'")]
    UnknownRule { token: String },

    #[error("约束参数无效: {rule}={value}")]
    InvalidArgument { rule: String, value: String },

    #[error("约束 '{rule}' 不适用于 {kind} 类型字段")]
    KindMismatch { rule: String, kind: String },
}

pub type Result<T> = std::result::Result<T, RuleError>;
