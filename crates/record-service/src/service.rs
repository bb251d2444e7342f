//! 记录服务
//!
//! 组合校验器与存储实现创建、更新、删除、查询用例，并把领域失败
//! 归类为稳定的错误类别供适配层映射。
//!
//! 存储整体放在一把互斥锁之后，"检查邮箱是否重复 → 写入" 在同一次加锁内完成，
//! 保证邮箱唯一性。

use parking_lot::Mutex;
use record_shared::observability::metrics;
use rule_engine::{Validate, ValidationOutcome, Validator};
use std::time::Instant;
use tracing::{error, info, instrument, warn};

use crate::error::{Result, ServiceError};
use crate::models::{CreateRecordRequest, Record, RecordCandidate, UpdateRecordRequest};
use crate::repository::RecordRepository;
use crate::store::RecordStore;

/// 记录服务
pub struct RecordService<R = RecordStore> {
    repo: Mutex<R>,
}

impl RecordService<RecordStore> {
    /// 使用带示例数据的内存存储创建服务
    pub fn with_sample_data() -> Self {
        Self::new(RecordStore::with_sample_data())
    }
}

impl<R: RecordRepository> RecordService<R> {
    pub fn new(repo: R) -> Self {
        metrics::set_records_stored(repo.count());
        Self {
            repo: Mutex::new(repo),
        }
    }

    /// 列出全部记录
    pub fn list_all(&self) -> Result<Vec<Record>> {
        let start = Instant::now();
        let result = Ok(self.repo.lock().list_all());
        Self::observe("list", start, &result);
        result
    }

    /// 按 id 查询
    #[instrument(skip(self))]
    pub fn get_by_id(&self, id: i64) -> Result<Record> {
        let start = Instant::now();
        let result = Self::ensure_positive(id)
            .and_then(|_| self.repo.lock().get_by_id(id).map_err(ServiceError::from));
        Self::observe("get", start, &result);
        result
    }

    /// 创建记录
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub fn create(&self, input: CreateRecordRequest) -> Result<Record> {
        let start = Instant::now();
        let result = self.create_inner(input);
        Self::observe("create", start, &result);

        if let Ok(record) = &result {
            info!(id = record.id, "记录已创建");
        }
        result
    }

    fn create_inner(&self, input: CreateRecordRequest) -> Result<Record> {
        Self::check(&input)?;

        let mut repo = self.repo.lock();
        if repo.email_exists(&input.email, 0) {
            return Err(ServiceError::DuplicateEmail(input.email));
        }

        let record = repo.create(RecordCandidate::from(input))?;
        metrics::set_records_stored(repo.count());
        Ok(record)
    }

    /// 整体更新记录，保留创建时间
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub fn update(&self, id: i64, input: UpdateRecordRequest) -> Result<Record> {
        let start = Instant::now();
        let result = self.update_inner(id, input);
        Self::observe("update", start, &result);

        if let Ok(record) = &result {
            info!(id = record.id, "记录已更新");
        }
        result
    }

    fn update_inner(&self, id: i64, input: UpdateRecordRequest) -> Result<Record> {
        Self::ensure_positive(id)?;
        Self::check(&input)?;

        let mut repo = self.repo.lock();
        repo.get_by_id(id)?;

        if repo.email_exists(&input.email, id) {
            return Err(ServiceError::DuplicateEmail(input.email));
        }

        Ok(repo.replace(id, RecordCandidate::from(input))?)
    }

    /// 删除记录，返回删除前的记录
    #[instrument(skip(self))]
    pub fn delete(&self, id: i64) -> Result<Record> {
        let start = Instant::now();
        let result = self.delete_inner(id);
        Self::observe("delete", start, &result);

        if let Ok(record) = &result {
            info!(id = record.id, "记录已删除");
        }
        result
    }

    fn delete_inner(&self, id: i64) -> Result<Record> {
        Self::ensure_positive(id)?;

        let mut repo = self.repo.lock();
        repo.get_by_id(id)?;

        let removed = repo.delete(id)?;
        metrics::set_records_stored(repo.count());
        Ok(removed)
    }

    fn ensure_positive(id: i64) -> Result<()> {
        if id <= 0 {
            return Err(ServiceError::InvalidId(id));
        }
        Ok(())
    }

    /// 快速失败校验，第一条违反的约束消息作为失败原因
    fn check<T: Validate>(input: &T) -> Result<()> {
        match Validator::validate(input) {
            ValidationOutcome::Valid => Ok(()),
            ValidationOutcome::Invalid(reason) => Err(ServiceError::InvalidInput(reason)),
        }
    }

    fn observe<T>(operation: &str, start: Instant, result: &Result<T>) {
        let elapsed = start.elapsed().as_secs_f64();
        match result {
            Ok(_) => metrics::record_record_operation(operation, "ok", elapsed),
            Err(err) => {
                if err.is_expected() {
                    warn!(operation, code = err.code(), "操作失败: {}", err);
                } else {
                    error!(operation, code = err.code(), "内部错误: {}", err);
                }
                metrics::record_record_operation(operation, err.code(), elapsed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::repository::MockRecordRepository;
    use mockall::predicate::eq;

    fn create_req(name: &str, email: &str, age: i64) -> CreateRecordRequest {
        CreateRecordRequest {
            name: name.to_string(),
            email: email.to_string(),
            age,
        }
    }

    fn update_req(name: &str, email: &str, age: i64) -> UpdateRecordRequest {
        UpdateRecordRequest {
            name: name.to_string(),
            email: email.to_string(),
            age,
        }
    }

    #[test]
    fn test_seeded_scenario() {
        let service = RecordService::with_sample_data();

        let amy = service
            .create(create_req("Amy Lee", "amy@example.com", 28))
            .unwrap();
        assert_eq!(amy.id, 4);

        let dup = service.create(create_req("Dup", "amy@example.com", 20));
        assert_eq!(
            dup,
            Err(ServiceError::DuplicateEmail("amy@example.com".to_string()))
        );
    }

    #[test]
    fn test_create_invalid_input_does_not_consume_id() {
        let service = RecordService::with_sample_data();

        let err = service.create(create_req("A", "a@example.com", 20));
        assert_eq!(
            err,
            Err(ServiceError::InvalidInput(
                "name must be at least 2 characters".to_string()
            ))
        );

        let created = service
            .create(create_req("Amy", "amy@example.com", 20))
            .unwrap();
        assert_eq!(created.id, 4);
    }

    #[test]
    fn test_get_by_id() {
        let service = RecordService::with_sample_data();

        assert_eq!(service.get_by_id(0), Err(ServiceError::InvalidId(0)));
        assert_eq!(service.get_by_id(-3), Err(ServiceError::InvalidId(-3)));
        assert_eq!(service.get_by_id(99), Err(ServiceError::NotFound(99)));

        let first = service.get_by_id(1).unwrap();
        let second = service.get_by_id(1).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_update_failure_order() {
        let service = RecordService::with_sample_data();

        // id 校验先于输入校验
        assert_eq!(
            service.update(0, update_req("", "", 0)),
            Err(ServiceError::InvalidId(0))
        );
        // 输入校验先于存在性检查
        assert_eq!(
            service.update(99, update_req("", "", 0)),
            Err(ServiceError::InvalidInput("name is required".to_string()))
        );
        assert_eq!(
            service.update(99, update_req("Ghost", "ghost@example.com", 30)),
            Err(ServiceError::NotFound(99))
        );
        assert_eq!(
            service.update(1, update_req("John", "jane@example.com", 30)),
            Err(ServiceError::DuplicateEmail("jane@example.com".to_string()))
        );
    }

    #[test]
    fn test_update_may_keep_own_email() {
        let service = RecordService::with_sample_data();
        let before = service.get_by_id(1).unwrap();

        let after = service
            .update(1, update_req("John Q. Doe", "john@example.com", 31))
            .unwrap();

        assert_eq!(after.id, 1);
        assert_eq!(after.age, 31);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);
    }

    #[test]
    fn test_delete_then_get() {
        let service = RecordService::with_sample_data();

        assert_eq!(service.delete(0), Err(ServiceError::InvalidId(0)));

        let removed = service.delete(2).unwrap();
        assert_eq!(removed.email, "jane@example.com");
        assert_eq!(service.get_by_id(2), Err(ServiceError::NotFound(2)));
        assert_eq!(service.delete(2), Err(ServiceError::NotFound(2)));
        assert_eq!(service.list_all().map(|r| r.len()), Ok(2));
    }

    #[test]
    fn test_deleted_email_can_be_reused() {
        let service = RecordService::with_sample_data();
        service.delete(3).unwrap();

        let created = service
            .create(create_req("Bobby", "bob@example.com", 40))
            .unwrap();
        assert_eq!(created.id, 4);
    }

    #[test]
    fn test_store_failure_is_internal() {
        let mut repo = MockRecordRepository::new();
        repo.expect_count().return_const(0usize);
        repo.expect_email_exists().return_const(false);
        repo.expect_create()
            .times(1)
            .returning(|_| Err(StoreError::IdExhausted));

        let service = RecordService::new(repo);
        let err = service
            .create(create_req("Amy", "amy@example.com", 28))
            .unwrap_err();

        assert_eq!(err.code(), "INTERNAL_ERROR");
        assert!(!err.is_expected());
    }

    #[test]
    fn test_update_checks_email_excluding_self() {
        let mut repo = MockRecordRepository::new();
        repo.expect_count().return_const(1usize);
        repo.expect_get_by_id().returning(|id| {
            Ok(Record {
                id,
                name: "Amy".to_string(),
                email: "amy@example.com".to_string(),
                age: 28,
                created_at: chrono::Utc::now(),
                updated_at: chrono::Utc::now(),
            })
        });
        repo.expect_email_exists()
            .with(eq("amy@example.com"), eq(5))
            .times(1)
            .return_const(true);
        repo.expect_replace().never();

        let service = RecordService::new(repo);
        assert_eq!(
            service.update(5, update_req("Amy", "amy@example.com", 28)),
            Err(ServiceError::DuplicateEmail("amy@example.com".to_string()))
        );
    }

    #[test]
    fn test_update_missing_record_skips_email_check() {
        let mut repo = MockRecordRepository::new();
        repo.expect_count().return_const(1usize);
        repo.expect_get_by_id()
            .with(eq(5))
            .returning(|id| Err(StoreError::NotFound(id)));
        repo.expect_email_exists().never();
        repo.expect_replace().never();

        let service = RecordService::new(repo);
        assert_eq!(
            service.update(5, update_req("Amy", "amy@example.com", 28)),
            Err(ServiceError::NotFound(5))
        );
    }

    #[test]
    fn test_invalid_input_never_touches_store() {
        let mut repo = MockRecordRepository::new();
        repo.expect_count().return_const(0usize);
        repo.expect_email_exists().never();
        repo.expect_create().never();

        let service = RecordService::new(repo);
        assert_eq!(
            service.create(create_req("Amy", "not-an-email", 28)),
            Err(ServiceError::InvalidInput(
                "email must be a valid email address".to_string()
            ))
        );
    }
}
