//! 记录管理 REST API
//!
//! 记录服务之上的薄适配层，只负责请求解析、失败类别到状态码的映射和响应封装。
//!
//! ## 模块结构
//!
//! - `dto`: 响应信封
//! - `error`: API 错误及状态码映射
//! - `handlers`: HTTP 请求处理器
//! - `routes`: 路由与中间件装配
//! - `state`: 应用状态

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use dto::ApiResponse;
pub use error::{Action, ApiError};
pub use routes::build_router;
pub use state::AppState;
