//! 日志系统模块
//!
//! 提供结构化日志配置和初始化功能

use crate::error::{Result, StatusBoardError};
use std::sync::OnceLock;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// 全局日志初始化标记，防止重复初始化
static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// 日志配置结构
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 日志级别（trace/debug/info/warn/error）
    pub level: String,
    /// 是否使用JSON格式输出
    pub json_format: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl LogConfig {
    /// 创建指定级别的日志配置
    ///
    /// # 参数
    /// * `level` - 日志级别
    ///
    /// # 返回
    /// * `Self` - 日志配置实例
    pub fn with_level(level: &str) -> Self {
        Self {
            level: level.to_string(),
            ..Default::default()
        }
    }
}

/// 初始化全局日志系统
///
/// 优先使用 `RUST_LOG` 环境变量，否则使用配置中的级别。
/// 重复调用时静默返回。
///
/// # 参数
/// * `config` - 日志配置
///
/// # 返回
/// * `Result<()>` - 初始化结果
pub fn init_logging(config: &LogConfig) -> Result<()> {
    if LOGGING_INITIALIZED.get().is_some() {
        return Ok(());
    }

    // 桥接log门面，捕获依赖库的log输出
    tracing_log::LogTracer::init()
        .map_err(|e| StatusBoardError::Other(anyhow::anyhow!("初始化log桥接失败: {e}")))?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", "status_board", config.level)));

    if config.json_format {
        let layer = fmt::layer().json().with_current_span(false);
        registry()
            .with(env_filter)
            .with(layer)
            .try_init()
            .map_err(|e| StatusBoardError::Other(anyhow::anyhow!("初始化日志系统失败: {e}")))?;
    } else {
        let layer = fmt::layer().with_target(true);
        registry()
            .with(env_filter)
            .with(layer)
            .try_init()
            .map_err(|e| StatusBoardError::Other(anyhow::anyhow!("初始化日志系统失败: {e}")))?;
    }

    let _ = LOGGING_INITIALIZED.set(());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json_format);
    }

    #[test]
    fn test_log_config_with_level() {
        let config = LogConfig::with_level("debug");
        assert_eq!(config.level, "debug");
    }

    #[test]
    fn test_init_logging_idempotent() {
        let config = LogConfig::default();
        // 第二次初始化不应报错
        assert!(init_logging(&config).is_ok());
        assert!(init_logging(&config).is_ok());
    }
}
