//! Web界面和API模块
//!
//! 提供HTML状态看板、JSON API和favicon状态指示器

use crate::board::StatusBoard;
use crate::poller::PollScheduler;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

pub mod handlers;
pub mod server;

pub use server::WebServer;

/// Web应用共享状态
#[derive(Clone)]
pub struct AppState {
    /// 状态看板
    pub board: Arc<RwLock<StatusBoard>>,
    /// 轮询调度器，用于手动刷新
    pub scheduler: Arc<PollScheduler>,
}

/// API响应包装器
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// 是否成功
    pub success: bool,
    /// 响应数据
    pub data: Option<T>,
    /// 错误信息
    pub error: Option<String>,
    /// 时间戳
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// 创建错误响应
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now(),
        }
    }
}
