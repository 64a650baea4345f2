//! 命令行接口模块
//!
//! 提供命令行参数定义和命令执行逻辑

pub mod args;
pub mod commands;

pub use args::{Args, Commands, LogLevel};
