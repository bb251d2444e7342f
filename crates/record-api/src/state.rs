//! 应用状态定义

use record_service::RecordService;
use std::sync::Arc;

/// Axum 应用共享状态
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<RecordService>,
}

impl AppState {
    pub fn new(records: RecordService) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    /// 使用带三条示例记录的内存存储
    pub fn with_sample_data() -> Self {
        Self::new(RecordService::with_sample_data())
    }
}
