//! 错误处理模块
//!
//! 定义应用程序的统一错误类型

use thiserror::Error;

/// Status Board 应用程序的主要错误类型
#[derive(Error, Debug)]
pub enum StatusBoardError {
    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 注册表相关错误
    #[error("注册表错误: {0}")]
    Registry(#[from] RegistryError),

    /// Web服务器错误
    #[error("Web服务器错误: {0}")]
    Web(String),

    /// IO错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON序列化/反序列化错误
    #[error("JSON错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 其他错误
    #[error("其他错误: {0}")]
    Other(#[from] anyhow::Error),
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 配置文件解析错误
    #[error("配置文件解析失败: {0}")]
    ParseError(String),

    /// 配置验证错误
    #[error("配置验证失败: {0}")]
    ValidationError(String),

    /// 配置文件不存在
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    /// 环境变量替换错误
    #[error("环境变量替换失败: {var}")]
    EnvVarError { var: String },
}

/// 注册表错误类型
#[derive(Error, Debug)]
pub enum RegistryError {
    /// HTTP请求错误（拉取注册表失败时直接向上传播，不重试）
    #[error("HTTP请求失败: {0}")]
    RequestError(#[from] reqwest::Error),

    /// 检查项标识冲突，(project, name) 必须唯一
    #[error("检查项重复: {project}/{name}")]
    DuplicateCheck { project: String, name: String },

    /// TTL无效，ttl=0 不受支持
    #[error("检查项 {project}/{name} 的TTL无效")]
    InvalidTtl { project: String, name: String },

    /// 未知项目
    #[error("未知项目 '{project}'")]
    UnknownProject { project: String },

    /// 未知检查项
    #[error("未知检查项 '{project}/{name}'")]
    UnknownCheck { project: String, name: String },
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, StatusBoardError>;
