//! 存储 Trait 定义
//!
//! 服务层依赖存储接口而非具体实现，便于用 mock 覆盖故障路径。

use crate::error::StoreError;
use crate::models::{Record, RecordCandidate};

/// 记录存储接口
///
/// 变更操作取 `&mut self`，互斥由调用方（服务层）提供。
#[cfg_attr(test, mockall::automock)]
pub trait RecordRepository: Send {
    /// 按插入顺序返回全部存活记录
    fn list_all(&self) -> Vec<Record>;

    fn get_by_id(&self, id: i64) -> Result<Record, StoreError>;

    fn get_by_email(&self, email: &str) -> Result<Record, StoreError>;

    /// 是否存在 id 不等于 `excluding_id` 且邮箱相同的记录，`excluding_id` 为 0 表示不排除
    fn email_exists(&self, email: &str, excluding_id: i64) -> bool;

    /// 分配下一个 id 并写入
    fn create(&mut self, candidate: RecordCandidate) -> Result<Record, StoreError>;

    /// 整体替换，保留 `created_at`，刷新 `updated_at`
    fn replace(&mut self, id: i64, candidate: RecordCandidate) -> Result<Record, StoreError>;

    /// 删除并返回删除前的记录
    fn delete(&mut self, id: i64) -> Result<Record, StoreError>;

    fn count(&self) -> usize;
}
