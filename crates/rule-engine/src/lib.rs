//! 声明式校验规则引擎
//!
//! 提供与具体字段无关的输入校验能力，支持：
//! - 约束标签（如 `required,min=2,max=50`）解析和编译
//! - 单值单规则评估
//! - 按字段声明顺序的短路校验
//! - 静态字段表声明（无运行时反射）

pub mod compiler;
pub mod error;
pub mod evaluator;
pub mod models;
pub mod operators;
pub mod schema;
pub mod validator;

pub use compiler::{CompiledTag, RuleCompiler};
pub use error::{Result, RuleError};
pub use evaluator::RuleEvaluator;
pub use models::{FieldKind, FieldValue, FieldViolation, ValidationOutcome};
pub use operators::Rule;
pub use schema::{Accessor, FieldSpec, Schema, SchemaBuilder, Validate};
pub use validator::Validator;
