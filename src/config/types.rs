//! 配置数据结构定义
//!
//! 定义应用程序的配置结构体和验证逻辑

use serde::{Deserialize, Serialize};

/// 主配置结构，包含注册表配置和Web服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// 检查项注册表配置
    pub registry: RegistryConfig,
    /// Web服务器配置
    #[serde(default)]
    pub server: ServerConfig,
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// 注册表配置结构
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistryConfig {
    /// 注册表端点URL，返回检查项JSON数组
    pub endpoint: String,
    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
    /// 默认TTL（秒），检查项未指定ttl时使用
    #[serde(default = "default_ttl")]
    pub default_ttl: u64,
}

/// Web服务器配置结构
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// 绑定地址
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 允许的CORS来源，为空时允许任意来源
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

// 默认值函数
fn default_log_level() -> String {
    "info".to_string()
}
fn default_timeout() -> u64 {
    10
}
fn default_ttl() -> u64 {
    60
}
fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8000
}

/// 配置验证函数
///
/// # 参数
/// * `config` - 要验证的配置
///
/// # 返回
/// * `Result<(), String>` - 验证结果，错误时返回错误信息
pub fn validate_config(config: &Config) -> Result<(), String> {
    // 验证注册表配置
    if !config.registry.endpoint.starts_with("http://")
        && !config.registry.endpoint.starts_with("https://")
    {
        return Err(format!(
            "注册表端点URL格式无效: {}",
            config.registry.endpoint
        ));
    }

    if config.registry.request_timeout_seconds == 0 {
        return Err("请求超时时间不能为0".to_string());
    }

    // ttl=0 不受支持
    if config.registry.default_ttl == 0 {
        return Err("默认TTL不能为0".to_string());
    }

    // 验证服务器配置
    if config.server.port == 0 {
        return Err(format!("无效的Web服务器端口: {}", config.server.port));
    }

    if config.server.bind_address.is_empty() {
        return Err("Web服务器绑定地址不能为空".to_string());
    }

    // 验证日志级别
    let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_log_levels.contains(&config.log_level.as_str()) {
        return Err(format!(
            "无效的日志级别: {}，支持的级别: {:?}",
            config.log_level, valid_log_levels
        ));
    }

    Ok(())
}
