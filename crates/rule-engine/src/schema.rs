//! 静态字段表
//!
//! 每种输入类型在初始化时声明一次有序的 `(字段名, 取值函数, 约束)` 表，
//! 取代运行时的类型内省。

use crate::compiler::RuleCompiler;
use crate::models::{FieldKind, FieldValue};
use crate::operators::Rule;

/// 字段取值函数
pub type Accessor<T> = for<'a> fn(&'a T) -> FieldValue<'a>;

/// 单个字段的声明
pub struct FieldSpec<T> {
    pub name: &'static str,
    pub kind: FieldKind,
    /// 原始约束标签，保留用于诊断
    pub tag: &'static str,
    pub rules: Vec<Rule>,
    accessor: Accessor<T>,
}

impl<T> FieldSpec<T> {
    /// 读取字段值
    pub fn value<'a>(&self, input: &'a T) -> FieldValue<'a> {
        (self.accessor)(input)
    }
}

impl<T> std::fmt::Debug for FieldSpec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("tag", &self.tag)
            .field("rules", &self.rules)
            .finish()
    }
}

/// 输入类型的字段表
#[derive(Debug)]
pub struct Schema<T> {
    name: &'static str,
    fields: Vec<FieldSpec<T>>,
}

impl<T> Schema<T> {
    pub fn builder(name: &'static str) -> SchemaBuilder<T> {
        SchemaBuilder {
            name,
            fields: Vec::new(),
        }
    }

    /// 字段表名称（通常为输入类型名）
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 按声明顺序返回所有字段
    pub fn fields(&self) -> &[FieldSpec<T>] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec<T>> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// 字段表构建器
///
/// 约束标签在 `build` 之前逐字段编译（宽松模式），未知约束被忽略。
pub struct SchemaBuilder<T> {
    name: &'static str,
    fields: Vec<FieldSpec<T>>,
}

impl<T> SchemaBuilder<T> {
    /// 声明字段
    pub fn field(
        mut self,
        name: &'static str,
        kind: FieldKind,
        tag: &'static str,
        accessor: Accessor<T>,
    ) -> Self {
        let compiled = RuleCompiler::compile_tag(kind, tag);
        self.fields.push(FieldSpec {
            name,
            kind,
            tag,
            rules: compiled.rules,
            accessor,
        });
        self
    }

    /// 声明字符串字段
    pub fn string_field(self, name: &'static str, tag: &'static str, accessor: Accessor<T>) -> Self {
        self.field(name, FieldKind::String, tag, accessor)
    }

    /// 声明整数字段
    pub fn integer_field(
        self,
        name: &'static str,
        tag: &'static str,
        accessor: Accessor<T>,
    ) -> Self {
        self.field(name, FieldKind::Integer, tag, accessor)
    }

    pub fn build(self) -> Schema<T> {
        Schema {
            name: self.name,
            fields: self.fields,
        }
    }
}

/// 可校验的输入类型
///
/// 实现者返回进程内唯一的静态字段表，通常借助 `OnceLock` 延迟构建。
pub trait Validate: Sized + 'static {
    fn schema() -> &'static Schema<Self>;
}
