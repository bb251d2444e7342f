//! 校验规则定义

use serde::Serialize;
use std::fmt;

/// 编译后的校验规则
///
/// 约束标签在初始化阶段解析为该封闭枚举，评估时通过穷尽匹配分派。
/// `min=`/`max=` 根据字段类型分别编译为长度约束或数值约束。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "rule", content = "bound", rename_all = "snake_case")]
pub enum Rule {
    Required,

    // 字符串长度（按字符计），负数边界保持原样参与比较
    MinLength(i64),
    MaxLength(i64),

    // 整数取值
    MinValue(i64),
    MaxValue(i64),

    EmailFormat,
}

impl Rule {
    /// 约束名称（与标签语法中的名称一致）
    pub fn name(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MinLength(_) | Self::MinValue(_) => "min",
            Self::MaxLength(_) | Self::MaxValue(_) => "max",
            Self::EmailFormat => "email",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "required"),
            Self::MinLength(n) => write!(f, "min={}", n),
            Self::MaxLength(n) => write!(f, "max={}", n),
            Self::MinValue(n) => write!(f, "min={}", n),
            Self::MaxValue(n) => write!(f, "max={}", n),
            Self::EmailFormat => write!(f, "email"),
        }
    }
}
