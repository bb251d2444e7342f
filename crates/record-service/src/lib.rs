//! 记录管理服务
//!
//! 单实体类型的增删改查领域层：
//!
//! - `models`: 记录实体与两类输入（创建/更新）及其静态校验字段表
//! - `store`: 进程内存储，负责 id 分配和邮箱唯一性查询
//! - `repository`: 存储抽象，服务层依赖 trait 而非具体实现
//! - `service`: 组合校验器与存储实现用例，并统一失败分类

pub mod error;
pub mod models;
pub mod repository;
pub mod service;
pub mod store;

pub use error::{Result, ServiceError, StoreError};
pub use models::{CreateRecordRequest, Record, RecordCandidate, UpdateRecordRequest};
pub use repository::RecordRepository;
pub use service::RecordService;
pub use store::RecordStore;
