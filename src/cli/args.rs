//! 命令行参数定义
//!
//! 使用clap定义应用程序的命令行接口

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Status Board - 分布式健康检查状态看板
#[derive(Parser, Debug, Clone)]
#[command(
    name = "status-board",
    version = crate::VERSION,
    about = crate::APP_DESCRIPTION,
    long_about = None
)]
pub struct Args {
    /// 配置文件路径
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "配置文件路径",
        env = "STATUS_BOARD_CONFIG"
    )]
    pub config: Option<PathBuf>,

    /// 日志级别
    #[arg(
        short,
        long,
        value_enum,
        default_value = "info",
        help = "日志级别",
        env = "STATUS_BOARD_LOG_LEVEL"
    )]
    pub log_level: LogLevel,

    /// 是否以JSON格式输出日志
    #[arg(long, help = "以JSON格式输出日志", env = "STATUS_BOARD_JSON_LOGS")]
    pub json_logs: bool,

    /// 子命令
    #[command(subcommand)]
    pub command: Commands,
}

/// 日志级别枚举
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum LogLevel {
    /// 调试级别
    Debug,
    /// 信息级别
    Info,
    /// 警告级别
    Warn,
    /// 错误级别
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// 子命令定义
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// 启动状态看板服务
    Serve,

    /// 执行一次性检查并打印结果
    Check {
        /// 项目名（可选，不指定则检查所有项目）
        #[arg(value_name = "PROJECT", help = "项目名")]
        project: Option<String>,

        /// 检查项名称（可选，需同时指定项目）
        #[arg(value_name = "NAME", help = "检查项名称", requires = "project")]
        name: Option<String>,
    },

    /// 验证配置文件
    Validate {
        /// 配置文件路径
        #[arg(value_name = "FILE", help = "配置文件路径")]
        config_path: Option<PathBuf>,
    },
}

impl Args {
    /// 解析命令行参数
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// 获取配置文件路径
    ///
    /// 未通过参数或环境变量指定时，回退到默认配置路径。
    pub fn get_config_path(&self) -> crate::error::Result<PathBuf> {
        match self.config.clone() {
            Some(config) => Ok(config),
            None => crate::config::loader::get_default_config_path(),
        }
    }
}
