//! Web服务器实现
//!
//! 提供HTTP服务器和路由管理

use super::{handlers, AppState};
use crate::config::ServerConfig;
use crate::error::{Result, StatusBoardError};
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Web服务器
pub struct WebServer {
    /// 服务器配置
    config: ServerConfig,
    /// 应用共享状态
    state: AppState,
}

impl WebServer {
    /// 创建新的Web服务器
    ///
    /// # 参数
    /// * `config` - 服务器配置
    /// * `state` - 应用共享状态
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// 创建路由
    ///
    /// 所有路由启用CORS；请求通过tower-http记录访问日志。
    pub fn create_router(&self) -> Router {
        let cors = if self.config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<HeaderValue> = self
                .config
                .cors_origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("忽略无效的CORS来源: {}", origin);
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .route("/", get(handlers::dashboard))
            .route("/checks", get(handlers::checks))
            .route("/favicon.svg", get(handlers::favicon))
            .route("/api/v1/status", get(handlers::api_status))
            .route(
                "/api/v1/checks/{project}/{name}/refresh",
                post(handlers::refresh_check),
            )
            .route("/__heartbeat__", get(handlers::heartbeat))
            .route("/__lbheartbeat__", get(handlers::lbheartbeat))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.state.clone())
    }

    /// 启动Web服务器，阻塞直到服务器退出
    ///
    /// # 返回
    /// * `Result<()>` - 运行结果
    pub async fn start(&self) -> Result<()> {
        let addr = format!("{}:{}", self.config.bind_address, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| StatusBoardError::Web(format!("绑定地址失败 {addr}: {e}")))?;

        info!("Web服务器已启动: http://{}", addr);
        info!("状态看板地址: http://{}/", addr);
        info!("API地址: http://{}/api/v1/status", addr);

        axum::serve(listener, self.create_router())
            .await
            .map_err(|e| StatusBoardError::Web(format!("服务器运行失败: {e}")))?;

        Ok(())
    }
}
