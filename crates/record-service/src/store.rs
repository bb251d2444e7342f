//! 内存存储
//!
//! 持有记录集合与单调递增的 id 计数器。id 永不复用，且替换不改变 id，
//! 因此按 id 升序遍历即为插入顺序。

use chrono::{DateTime, TimeDelta, Utc};
use std::collections::BTreeMap;

use crate::error::StoreError;
use crate::models::{Record, RecordCandidate};
use crate::repository::RecordRepository;

/// 进程内记录存储
///
/// 纯单所有者逻辑，不做内部加锁；并发访问由外层互斥保证。
#[derive(Debug)]
pub struct RecordStore {
    records: BTreeMap<i64, Record>,
    next_id: i64,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    /// 创建空存储，首个 id 为 1
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// 创建带三条示例记录的存储，后续创建从 id 4 开始
    pub fn with_sample_data() -> Self {
        let samples = [
            (1, "John Doe", "john@example.com", 30),
            (2, "Jane Smith", "jane@example.com", 25),
            (3, "Bob Johnson", "bob@example.com", 35),
        ];

        let now = Utc::now();
        let records: BTreeMap<i64, Record> = samples
            .into_iter()
            .map(|(id, name, email, age)| {
                let record = Record {
                    id,
                    name: name.to_string(),
                    email: email.to_string(),
                    age,
                    created_at: now,
                    updated_at: now,
                };
                (id, record)
            })
            .collect();

        Self {
            records,
            next_id: 4,
        }
    }

    /// 下一个待分配的 id
    pub fn next_id(&self) -> i64 {
        self.next_id
    }

    /// 新的更新时间，保证严格晚于上一次
    fn refreshed_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
        let now = Utc::now();
        if now > previous {
            now
        } else {
            previous + TimeDelta::microseconds(1)
        }
    }
}

impl RecordRepository for RecordStore {
    fn list_all(&self) -> Vec<Record> {
        self.records.values().cloned().collect()
    }

    fn get_by_id(&self, id: i64) -> Result<Record, StoreError> {
        self.records
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn get_by_email(&self, email: &str) -> Result<Record, StoreError> {
        self.records
            .values()
            .find(|r| r.email == email)
            .cloned()
            .ok_or_else(|| StoreError::EmailNotFound(email.to_string()))
    }

    fn email_exists(&self, email: &str, excluding_id: i64) -> bool {
        self.records
            .values()
            .any(|r| r.email == email && r.id != excluding_id)
    }

    fn create(&mut self, candidate: RecordCandidate) -> Result<Record, StoreError> {
        let id = self.next_id;
        let next_id = id.checked_add(1).ok_or(StoreError::IdExhausted)?;

        let now = Utc::now();
        let record = Record {
            id,
            name: candidate.name,
            email: candidate.email,
            age: candidate.age,
            created_at: now,
            updated_at: now,
        };

        self.records.insert(id, record.clone());
        self.next_id = next_id;

        Ok(record)
    }

    fn replace(&mut self, id: i64, candidate: RecordCandidate) -> Result<Record, StoreError> {
        let existing = self.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        let updated_at = Self::refreshed_timestamp(existing.updated_at);
        *existing = Record {
            id,
            name: candidate.name,
            email: candidate.email,
            age: candidate.age,
            created_at: existing.created_at,
            updated_at,
        };

        Ok(existing.clone())
    }

    fn delete(&mut self, id: i64) -> Result<Record, StoreError> {
        self.records.remove(&id).ok_or(StoreError::NotFound(id))
    }

    fn count(&self) -> usize {
        self.records.len()
    }
}
