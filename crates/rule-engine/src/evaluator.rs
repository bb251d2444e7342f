//! 规则评估器
//!
//! 对单个字段值评估单条规则，按值类型穷尽处理每种规则。

use crate::models::{FieldValue, ValidationOutcome};
use crate::operators::Rule;
use regex::Regex;
use std::sync::OnceLock;

/// 邮箱格式：local-part@domain.tld，顶级域名至少两个字母
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

/// 字符数
fn char_len(s: &str) -> i64 {
    i64::try_from(s.chars().count()).unwrap_or(i64::MAX)
}

/// 规则评估器
pub struct RuleEvaluator;

impl RuleEvaluator {
    /// 评估规则
    ///
    /// # Arguments
    /// * `field` - 字段名，用于生成失败消息
    /// * `value` - 字段值
    /// * `rule` - 已编译的规则
    ///
    /// 值类型与规则不匹配时（如对整数做邮箱校验）视为通过。
    pub fn evaluate(field: &str, value: FieldValue<'_>, rule: Rule) -> ValidationOutcome {
        match rule {
            Rule::Required => Self::required(field, value),
            Rule::MinLength(min) => Self::min_length(field, value, min),
            Rule::MaxLength(max) => Self::max_length(field, value, max),
            Rule::MinValue(min) => Self::min_value(field, value, min),
            Rule::MaxValue(max) => Self::max_value(field, value, max),
            Rule::EmailFormat => Self::email(field, value),
        }
    }

    fn required(field: &str, value: FieldValue<'_>) -> ValidationOutcome {
        if value.is_zero() {
            ValidationOutcome::invalid(format!("{} is required", field))
        } else {
            ValidationOutcome::Valid
        }
    }

    fn min_length(field: &str, value: FieldValue<'_>, min: i64) -> ValidationOutcome {
        match value {
            FieldValue::Str(s) if char_len(s) < min => ValidationOutcome::invalid(format!(
                "{} must be at least {} characters",
                field, min
            )),
            FieldValue::Str(_) | FieldValue::Int(_) | FieldValue::Absent => {
                ValidationOutcome::Valid
            }
        }
    }

    fn max_length(field: &str, value: FieldValue<'_>, max: i64) -> ValidationOutcome {
        match value {
            FieldValue::Str(s) if char_len(s) > max => ValidationOutcome::invalid(format!(
                "{} must be at most {} characters",
                field, max
            )),
            FieldValue::Str(_) | FieldValue::Int(_) | FieldValue::Absent => {
                ValidationOutcome::Valid
            }
        }
    }

    fn min_value(field: &str, value: FieldValue<'_>, min: i64) -> ValidationOutcome {
        match value {
            FieldValue::Int(n) if n < min => {
                ValidationOutcome::invalid(format!("{} must be at least {}", field, min))
            }
            FieldValue::Int(_) | FieldValue::Str(_) | FieldValue::Absent => {
                ValidationOutcome::Valid
            }
        }
    }

    fn max_value(field: &str, value: FieldValue<'_>, max: i64) -> ValidationOutcome {
        match value {
            FieldValue::Int(n) if n > max => {
                ValidationOutcome::invalid(format!("{} must be at most {}", field, max))
            }
            FieldValue::Int(_) | FieldValue::Str(_) | FieldValue::Absent => {
                ValidationOutcome::Valid
            }
        }
    }

    fn email(field: &str, value: FieldValue<'_>) -> ValidationOutcome {
        match value {
            FieldValue::Str(s) if !Self::is_email(s) => ValidationOutcome::invalid(format!(
                "{} must be a valid email address",
                field
            )),
            FieldValue::Str(_) | FieldValue::Int(_) | FieldValue::Absent => {
                ValidationOutcome::Valid
            }
        }
    }

    /// 邮箱格式检查
    pub fn is_email(s: &str) -> bool {
        email_regex().is_match(s)
    }
}
