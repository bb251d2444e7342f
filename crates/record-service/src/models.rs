//! 记录实体与输入模型

use chrono::{DateTime, Utc};
use rule_engine::{FieldValue, Schema, Validate};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// 名称约束
const NAME_RULES: &str = "required,min=2,max=50";
/// 邮箱约束
const EMAIL_RULES: &str = "required,email";
/// 年龄约束
const AGE_RULES: &str = "min=1,max=120";

/// 记录实体
///
/// `id` 由存储分配且创建后不变；`email` 在所有存活记录中唯一。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 已校验、待写入存储的候选数据（不含 id 和时间戳）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordCandidate {
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// 创建记录请求
///
/// 缺失字段取零值，由校验器报告。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CreateRecordRequest {
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// 更新记录请求（整体替换）
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpdateRecordRequest {
    pub name: String,
    pub email: String,
    pub age: i64,
}

impl Validate for CreateRecordRequest {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: OnceLock<Schema<CreateRecordRequest>> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::<CreateRecordRequest>::builder("create_record")
                .string_field("name", NAME_RULES, |r| FieldValue::Str(&r.name))
                .string_field("email", EMAIL_RULES, |r| FieldValue::Str(&r.email))
                .integer_field("age", AGE_RULES, |r| FieldValue::Int(r.age))
                .build()
        })
    }
}

impl Validate for UpdateRecordRequest {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: OnceLock<Schema<UpdateRecordRequest>> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::<UpdateRecordRequest>::builder("update_record")
                .string_field("name", NAME_RULES, |r| FieldValue::Str(&r.name))
                .string_field("email", EMAIL_RULES, |r| FieldValue::Str(&r.email))
                .integer_field("age", AGE_RULES, |r| FieldValue::Int(r.age))
                .build()
        })
    }
}

impl From<CreateRecordRequest> for RecordCandidate {
    fn from(req: CreateRecordRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            age: req.age,
        }
    }
}

impl From<UpdateRecordRequest> for RecordCandidate {
    fn from(req: UpdateRecordRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            age: req.age,
        }
    }
}
