//! 配置管理模块
//!
//! 提供配置数据结构、TOML加载和验证功能

pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, TomlConfigLoader};
pub use types::{validate_config, Config, RegistryConfig, ServerConfig};
