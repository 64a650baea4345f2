//! Status Board - 分布式健康检查状态看板
//!
//! 这是一个用Rust编写的状态看板服务，支持：
//! - 从中心端点拉取检查项注册表
//! - 按检查项独立TTL定时轮询结果
//! - HTML状态看板和JSON API
//! - 全局favicon状态指示器
//! - 结构化日志记录

pub mod board;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod poller;
pub mod registry;
pub mod web;

// 重新导出主要类型
pub use board::{CardState, Favicon, StatusBoard};
pub use config::{Config, RegistryConfig, ServerConfig};
pub use error::StatusBoardError;
pub use poller::{CheckFetcher, CheckResult, HttpCheckFetcher, PollScheduler};
pub use registry::{Check, CheckKey, RegistryClient};

/// 应用程序版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 应用程序名称
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// 应用程序描述
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
