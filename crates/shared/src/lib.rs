//! 共享库
//!
//! 包含记录服务各组件共用的配置加载和可观测性基础设施。

pub mod config;
pub mod observability;
