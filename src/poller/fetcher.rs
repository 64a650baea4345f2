//! 检查结果拉取器实现
//!
//! 对单个检查项的结果URL发起HTTP请求并解析结果负载

use crate::error::{RegistryError, Result};
use crate::poller::result::CheckResult;
use crate::registry::Check;
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// 检查结果拉取器trait，定义拉取接口
#[async_trait]
pub trait CheckFetcher: Send + Sync {
    /// 拉取单个检查项的当前结果
    ///
    /// 任何网络或解析异常都会被转换为合成失败结果，不向调用方抛出。
    ///
    /// # 参数
    /// * `check` - 检查项
    ///
    /// # 返回
    /// * `CheckResult` - 检查结果
    async fn fetch(&self, check: &Check) -> CheckResult;
}

/// HTTP检查结果拉取器实现
pub struct HttpCheckFetcher {
    /// HTTP客户端
    client: Client,
}

impl HttpCheckFetcher {
    /// 创建新的HTTP拉取器
    ///
    /// # 参数
    /// * `timeout` - 请求超时时间
    ///
    /// # 返回
    /// * `Result<Self>` - 拉取器实例
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
            .build()
            .map_err(RegistryError::RequestError)?;

        Ok(Self { client })
    }

    /// 执行单次请求并解析负载
    ///
    /// 失败中的检查端点以非2xx状态码返回结果负载，因此不校验状态码，
    /// 直接解析响应体。
    async fn perform_request(&self, check: &Check) -> std::result::Result<CheckResult, reqwest::Error> {
        let response = self.client.get(&check.url).send().await?;
        response.json::<CheckResult>().await
    }
}

#[async_trait]
impl CheckFetcher for HttpCheckFetcher {
    async fn fetch(&self, check: &Check) -> CheckResult {
        let started = Instant::now();

        match self.perform_request(check).await {
            Ok(result) => {
                debug!(
                    "检查 {} 拉取完成，成功: {}，本地耗时: {}ms",
                    check.key(),
                    result.success,
                    started.elapsed().as_millis()
                );
                result
            }
            Err(e) => {
                warn!("检查 {} 拉取失败: {}", check.key(), e);
                CheckResult::synthetic_failure(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn check_with_url(url: &str) -> Check {
        Check {
            project: "core".to_string(),
            name: "heartbeat".to_string(),
            url: url.to_string(),
            ttl: 60,
            parameters: BTreeMap::new(),
            description: "Test check".to_string(),
            documentation: String::new(),
        }
    }

    #[tokio::test]
    async fn test_fetch_success_payload() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/checks/core/heartbeat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"success": true, "data": {"ok": true}, "duration": 12,
                    "datetime": "2024-03-01T12:00:00Z"}"#,
            )
            .create_async()
            .await;

        let fetcher = HttpCheckFetcher::new(Duration::from_secs(5)).unwrap();
        let check = check_with_url(&format!("{}/checks/core/heartbeat", server.url()));

        let result = fetcher.fetch(&check).await;
        assert!(result.success);
        assert_eq!(result.duration, 12);
    }

    #[tokio::test]
    async fn test_fetch_failure_payload_on_503() {
        // 失败中的检查端点以503返回结果负载，负载仍需被解析
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/checks/core/heartbeat")
            .with_status(503)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": false, "data": "boom", "duration": 7}"#)
            .create_async()
            .await;

        let fetcher = HttpCheckFetcher::new(Duration::from_secs(5)).unwrap();
        let check = check_with_url(&format!("{}/checks/core/heartbeat", server.url()));

        let result = fetcher.fetch(&check).await;
        assert!(!result.success);
        assert_eq!(result.duration, 7);
        assert_eq!(result.data, serde_json::Value::String("boom".to_string()));
    }

    #[tokio::test]
    async fn test_fetch_synthesizes_failure_on_parse_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/checks/core/heartbeat")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let fetcher = HttpCheckFetcher::new(Duration::from_secs(5)).unwrap();
        let check = check_with_url(&format!("{}/checks/core/heartbeat", server.url()));

        let result = fetcher.fetch(&check).await;
        assert!(!result.success);
        assert_eq!(result.duration, 0);
        assert!(result.data.is_string());
    }

    #[tokio::test]
    async fn test_fetch_synthesizes_failure_on_connection_error() {
        let fetcher = HttpCheckFetcher::new(Duration::from_secs(1)).unwrap();
        // 未监听的本地端口
        let check = check_with_url("http://127.0.0.1:1/checks/core/heartbeat");

        let result = fetcher.fetch(&check).await;
        assert!(!result.success);
        assert_eq!(result.duration, 0);
        // 负载为错误的字符串形式
        assert!(result.data.is_string());
    }
}
