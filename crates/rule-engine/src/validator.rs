//! 输入校验器
//!
//! 按字段声明顺序、字段内按约束顺序评估，遇到第一条失败立即返回（短路求值），
//! 保证同一输入总是得到相同的错误消息。

use crate::evaluator::RuleEvaluator;
use crate::models::{FieldViolation, ValidationOutcome};
use crate::schema::{Schema, Validate};
use tracing::trace;

/// 输入校验器
pub struct Validator;

impl Validator {
    /// 快速失败校验
    pub fn validate<T: Validate>(input: &T) -> ValidationOutcome {
        Self::validate_with(T::schema(), input)
    }

    /// 使用指定字段表做快速失败校验
    pub fn validate_with<T>(schema: &Schema<T>, input: &T) -> ValidationOutcome {
        for field in schema.fields() {
            let value = field.value(input);

            for rule in &field.rules {
                let outcome = RuleEvaluator::evaluate(field.name, value, *rule);

                if let ValidationOutcome::Invalid(reason) = outcome {
                    trace!(
                        schema = schema.name(),
                        field = field.name,
                        rule = %rule,
                        "校验短路: {}",
                        reason
                    );
                    return ValidationOutcome::Invalid(reason);
                }
            }
        }

        ValidationOutcome::Valid
    }

    /// 全量校验
    ///
    /// 返回所有失败约束，顺序与快速失败模式的评估顺序一致；
    /// 结果的第一项即为 [`Validator::validate`] 返回的消息。
    pub fn validate_all<T: Validate>(input: &T) -> Vec<FieldViolation> {
        Self::validate_all_with(T::schema(), input)
    }

    pub fn validate_all_with<T>(schema: &Schema<T>, input: &T) -> Vec<FieldViolation> {
        let mut violations = Vec::new();

        for field in schema.fields() {
            let value = field.value(input);

            for rule in &field.rules {
                if let ValidationOutcome::Invalid(message) =
                    RuleEvaluator::evaluate(field.name, value, *rule)
                {
                    violations.push(FieldViolation {
                        field: field.name,
                        rule: rule.to_string(),
                        message,
                    });
                }
            }
        }

        violations
    }
}
