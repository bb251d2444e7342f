//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::observability::ObservabilityConfig;

/// 服务配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    pub server: ServerConfig,
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: "record-api".to_string(),
            environment: "development".to_string(),
            server: ServerConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. config/default.toml（默认配置）
    /// 2. config/{environment}.toml（环境特定配置）
    /// 3. config/{service_name}.toml（服务特定配置）
    /// 4. 环境变量（RECORD_ 前缀，层级用双下划线，如 RECORD_SERVER__PORT -> server.port）
    /// 5. PORT 环境变量（仅覆盖监听端口）
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("RECORD_ENV").unwrap_or_else(|_| "development".to_string());

        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", env.clone())?
            .add_source(File::from(Path::new(&config_dir).join("default.toml")).required(false))
            .add_source(
                File::from(Path::new(&config_dir).join(format!("{}.toml", env))).required(false),
            )
            .add_source(
                File::from(Path::new(&config_dir).join(format!("{}.toml", service_name)))
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("RECORD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        if let Some(port) = Self::port_override(|key| std::env::var(key).ok()) {
            config.server.port = port;
        }

        Ok(config)
    }

    /// 读取 PORT 覆盖值，无法解析时忽略
    fn port_override<F>(lookup: F) -> Option<u16>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup("PORT")
            .filter(|v| !v.trim().is_empty())
            .and_then(|v| v.trim().parse().ok())
    }

    /// 获取服务地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn test_server_addr() {
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8081,
            },
            ..Default::default()
        };
        assert_eq!(config.server_addr(), "127.0.0.1:8081");
    }

    #[test]
    fn test_port_override() {
        assert_eq!(AppConfig::port_override(|_| Some("4000".to_string())), Some(4000));
        assert_eq!(AppConfig::port_override(|_| Some(" 4001 ".to_string())), Some(4001));
        assert_eq!(AppConfig::port_override(|_| Some("".to_string())), None);
        assert_eq!(AppConfig::port_override(|_| Some("abc".to_string())), None);
        assert_eq!(AppConfig::port_override(|_| None), None);
    }

    #[test]
    fn test_partial_source_uses_defaults() {
        let config: AppConfig = Config::builder()
            .set_override("server.port", 9000)
            .and_then(|b| b.build())
            .and_then(|c| c.try_deserialize())
            .expect("config should deserialize");

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.service_name, "record-api");
        assert_eq!(config.observability.log_level, "info");
    }
}
