//! 约束标签编译器
//!
//! 将 `required,min=2,max=50` 形式的声明式标签解析为 [`Rule`] 列表。
//! 标签在字段表构建时编译一次，评估阶段不再做字符串匹配。

use crate::error::{Result, RuleError};
use crate::models::FieldKind;
use crate::operators::Rule;
use tracing::debug;

/// 编译后的约束标签
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledTag {
    /// 按声明顺序排列的规则
    pub rules: Vec<Rule>,
    /// 被忽略的约束（未知名称或参数无效）
    pub ignored: Vec<String>,
}

/// 单个约束的解析结果
enum Token {
    Rule(Rule),
    Unknown,
    Malformed { rule: String, value: String },
}

/// 约束标签编译器
pub struct RuleCompiler;

impl RuleCompiler {
    /// 宽松编译
    ///
    /// 未知约束和非数字的 `min=`/`max=` 参数不视为错误，直接跳过并记录在
    /// [`CompiledTag::ignored`] 中。
    pub fn compile_tag(kind: FieldKind, tag: &str) -> CompiledTag {
        let mut compiled = CompiledTag::default();

        for token in Self::tokens(tag) {
            match Self::parse_token(kind, token) {
                Token::Rule(rule) => compiled.rules.push(rule),
                Token::Unknown | Token::Malformed { .. } => {
                    debug!(token = %token, kind = %kind, "忽略无法识别的约束");
                    compiled.ignored.push(token.to_string());
                }
            }
        }

        compiled
    }

    /// 严格编译
    ///
    /// 任何未知约束、无效参数或与字段类型不匹配的约束都返回错误，
    /// 用于在声明字段表时尽早发现拼写错误。
    pub fn compile_tag_strict(kind: FieldKind, tag: &str) -> Result<Vec<Rule>> {
        let mut rules = Vec::new();

        for token in Self::tokens(tag) {
            match Self::parse_token(kind, token) {
                Token::Rule(Rule::EmailFormat) if kind != FieldKind::String => {
                    return Err(RuleError::KindMismatch {
                        rule: "email".to_string(),
                        kind: kind.to_string(),
                    });
                }
                Token::Rule(rule) => rules.push(rule),
                Token::Unknown => {
                    return Err(RuleError::UnknownRule {
                        token: token.to_string(),
                    });
                }
                Token::Malformed { rule, value } => {
                    return Err(RuleError::InvalidArgument { rule, value });
                }
            }
        }

        Ok(rules)
    }

    /// 拆分标签：逗号分隔，去除首尾空白，跳过空项
    fn tokens(tag: &str) -> impl Iterator<Item = &str> {
        tag.split(',').map(str::trim).filter(|t| !t.is_empty())
    }

    fn parse_token(kind: FieldKind, token: &str) -> Token {
        match token {
            "required" => return Token::Rule(Rule::Required),
            "email" => return Token::Rule(Rule::EmailFormat),
            _ => {}
        }

        let Some((name, value)) = token.split_once('=') else {
            return Token::Unknown;
        };

        let is_min = match name {
            "min" => true,
            "max" => false,
            _ => return Token::Unknown,
        };

        let Ok(bound) = value.parse::<i64>() else {
            return Token::Malformed {
                rule: name.to_string(),
                value: value.to_string(),
            };
        };

        Token::Rule(match (kind, is_min) {
            (FieldKind::String, true) => Rule::MinLength(bound),
            (FieldKind::String, false) => Rule::MaxLength(bound),
            (FieldKind::Integer, true) => Rule::MinValue(bound),
            (FieldKind::Integer, false) => Rule::MaxValue(bound),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_string_tag() {
        let compiled = RuleCompiler::compile_tag(FieldKind::String, "required,min=2,max=50");

        assert_eq!(
            compiled.rules,
            vec![Rule::Required, Rule::MinLength(2), Rule::MaxLength(50)]
        );
        assert!(compiled.ignored.is_empty());
    }

    #[test]
    fn test_compile_integer_tag() {
        let compiled = RuleCompiler::compile_tag(FieldKind::Integer, "min=1,max=120");

        assert_eq!(compiled.rules, vec![Rule::MinValue(1), Rule::MaxValue(120)]);
    }

    #[test]
    fn test_tokens_are_trimmed() {
        let compiled = RuleCompiler::compile_tag(FieldKind::String, " required , email ,");

        assert_eq!(compiled.rules, vec![Rule::Required, Rule::EmailFormat]);
    }

    #[test]
    fn test_unknown_rules_are_ignored() {
        let compiled = RuleCompiler::compile_tag(FieldKind::String, "required,uuid,min,required=1");

        assert_eq!(compiled.rules, vec![Rule::Required]);
        assert_eq!(compiled.ignored, vec!["uuid", "min", "required=1"]);
    }

    #[test]
    fn test_malformed_bounds_are_ignored() {
        let compiled = RuleCompiler::compile_tag(FieldKind::String, "min=abc,max=2.5,max=10");

        assert_eq!(compiled.rules, vec![Rule::MaxLength(10)]);
        assert_eq!(compiled.ignored, vec!["min=abc", "max=2.5"]);

        let compiled = RuleCompiler::compile_tag(FieldKind::Integer, "min=-5,max=1.5");
        assert_eq!(compiled.rules, vec![Rule::MinValue(-5)]);
        assert_eq!(compiled.ignored, vec!["max=1.5"]);
    }

    #[test]
    fn test_negative_string_bounds_are_kept() {
        let compiled = RuleCompiler::compile_tag(FieldKind::String, "min=-3,max=-1");

        assert_eq!(compiled.rules, vec![Rule::MinLength(-3), Rule::MaxLength(-1)]);
        assert!(compiled.ignored.is_empty());
    }

    #[test]
    fn test_empty_tag() {
        assert_eq!(
            RuleCompiler::compile_tag(FieldKind::String, ""),
            CompiledTag::default()
        );
    }

    #[test]
    fn test_strict_compile() {
        assert_eq!(
            RuleCompiler::compile_tag_strict(FieldKind::String, "required,email"),
            Ok(vec![Rule::Required, Rule::EmailFormat])
        );

        assert_eq!(
            RuleCompiler::compile_tag_strict(FieldKind::String, "required,uuid"),
            Err(RuleError::UnknownRule {
                token: "uuid".to_string()
            })
        );

        assert_eq!(
            RuleCompiler::compile_tag_strict(FieldKind::Integer, "min=x"),
            Err(RuleError::InvalidArgument {
                rule: "min".to_string(),
                value: "x".to_string()
            })
        );

        assert!(matches!(
            RuleCompiler::compile_tag_strict(FieldKind::Integer, "email"),
            Err(RuleError::KindMismatch { .. })
        ));
    }
}
