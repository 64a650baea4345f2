//! 检查项注册表模块
//!
//! 提供检查项数据结构和从中心端点拉取注册表的客户端

use crate::error::{RegistryError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::time::Duration;
use tracing::{debug, info};

/// 检查项的唯一标识，(project, name) 在注册表内不允许重复
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CheckKey {
    /// 所属项目
    pub project: String,
    /// 检查项名称
    pub name: String,
}

impl CheckKey {
    /// 创建新的检查项标识
    pub fn new(project: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for CheckKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.project, self.name)
    }
}

/// 注册表返回的原始检查项记录
///
/// `ttl` 可缺省，由配置的默认TTL补全。
#[derive(Debug, Clone, Deserialize)]
pub struct CheckRecord {
    /// 所属项目
    pub project: String,
    /// 检查项名称
    pub name: String,
    /// 结果URL
    pub url: String,
    /// 轮询间隔（秒）
    #[serde(default)]
    pub ttl: Option<u64>,
    /// 检查参数
    #[serde(default)]
    pub parameters: BTreeMap<String, serde_json::Value>,
    /// 简短描述
    #[serde(default)]
    pub description: String,
    /// 详细文档
    #[serde(default)]
    pub documentation: String,
}

/// 检查项，拉取完成后不可变
#[derive(Debug, Clone, Serialize)]
pub struct Check {
    /// 所属项目
    pub project: String,
    /// 检查项名称
    pub name: String,
    /// 结果URL
    pub url: String,
    /// 轮询间隔（秒）
    pub ttl: u64,
    /// 检查参数
    pub parameters: BTreeMap<String, serde_json::Value>,
    /// 简短描述
    pub description: String,
    /// 详细文档
    pub documentation: String,
}

impl Check {
    /// 获取检查项标识
    pub fn key(&self) -> CheckKey {
        CheckKey::new(self.project.clone(), self.name.clone())
    }
}

/// 将原始记录转换为检查项列表
///
/// 补全缺省TTL，并验证 (project, name) 唯一性和TTL有效性。
///
/// # 参数
/// * `records` - 注册表返回的原始记录
/// * `default_ttl` - 默认TTL（秒）
///
/// # 返回
/// * `Result<Vec<Check>>` - 检查项列表或错误
pub fn build_checks(records: Vec<CheckRecord>, default_ttl: u64) -> Result<Vec<Check>> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut checks = Vec::with_capacity(records.len());

    for record in records {
        if !seen.insert((record.project.clone(), record.name.clone())) {
            return Err(RegistryError::DuplicateCheck {
                project: record.project,
                name: record.name,
            }
            .into());
        }

        // ttl=0 不受支持
        let ttl = record.ttl.unwrap_or(default_ttl);
        if ttl == 0 {
            return Err(RegistryError::InvalidTtl {
                project: record.project,
                name: record.name,
            }
            .into());
        }

        checks.push(Check {
            project: record.project,
            name: record.name,
            url: record.url,
            ttl,
            parameters: record.parameters,
            description: record.description,
            documentation: record.documentation,
        });
    }

    Ok(checks)
}

/// 按项目和名称筛选检查项
///
/// 不指定项目时返回全部；指定的项目或检查项不存在时报错。
///
/// # 参数
/// * `checks` - 检查项列表
/// * `project` - 项目名（可选）
/// * `name` - 检查项名称（可选，需同时指定项目）
///
/// # 返回
/// * `Result<Vec<&Check>>` - 筛选结果或错误
pub fn select<'a>(
    checks: &'a [Check],
    project: Option<&str>,
    name: Option<&str>,
) -> Result<Vec<&'a Check>> {
    let Some(project) = project else {
        return Ok(checks.iter().collect());
    };

    let selected: Vec<&Check> = checks.iter().filter(|c| c.project == project).collect();
    if selected.is_empty() {
        return Err(RegistryError::UnknownProject {
            project: project.to_string(),
        }
        .into());
    }

    let Some(name) = name else {
        return Ok(selected);
    };

    let selected: Vec<&Check> = selected.into_iter().filter(|c| c.name == name).collect();
    if selected.is_empty() {
        return Err(RegistryError::UnknownCheck {
            project: project.to_string(),
            name: name.to_string(),
        }
        .into());
    }

    Ok(selected)
}

/// 注册表客户端
///
/// 启动时从固定端点拉取一次检查项列表，失败时直接向调用方传播错误，不重试。
pub struct RegistryClient {
    /// HTTP客户端
    client: Client,
    /// 注册表端点URL
    endpoint: String,
    /// 默认TTL（秒）
    default_ttl: u64,
}

impl RegistryClient {
    /// 创建新的注册表客户端
    ///
    /// # 参数
    /// * `endpoint` - 注册表端点URL
    /// * `timeout` - 请求超时时间
    /// * `default_ttl` - 默认TTL（秒）
    ///
    /// # 返回
    /// * `Result<Self>` - 客户端实例
    pub fn new(endpoint: String, timeout: Duration, default_ttl: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
            .build()
            .map_err(RegistryError::RequestError)?;

        Ok(Self {
            client,
            endpoint,
            default_ttl,
        })
    }

    /// 拉取检查项注册表
    ///
    /// # 返回
    /// * `Result<Vec<Check>>` - 检查项列表或错误
    pub async fn fetch_checks(&self) -> Result<Vec<Check>> {
        debug!("拉取检查项注册表: {}", self.endpoint);

        let records: Vec<CheckRecord> = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(RegistryError::RequestError)?
            .error_for_status()
            .map_err(RegistryError::RequestError)?
            .json()
            .await
            .map_err(RegistryError::RequestError)?;

        let checks = build_checks(records, self.default_ttl)?;
        info!("注册表拉取完成，检查项数量: {}", checks.len());

        Ok(checks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatusBoardError;

    fn record(project: &str, name: &str, ttl: Option<u64>) -> CheckRecord {
        CheckRecord {
            project: project.to_string(),
            name: name.to_string(),
            url: format!("https://example.com/checks/{project}/{name}"),
            ttl,
            parameters: BTreeMap::new(),
            description: String::new(),
            documentation: String::new(),
        }
    }

    #[test]
    fn test_check_key_display() {
        let key = CheckKey::new("normandy", "reported-recipes");
        assert_eq!(key.to_string(), "normandy/reported-recipes");
    }

    #[test]
    fn test_build_checks_applies_default_ttl() {
        let checks = build_checks(vec![record("a", "x", None)], 60).unwrap();
        assert_eq!(checks[0].ttl, 60);

        let checks = build_checks(vec![record("a", "x", Some(120))], 60).unwrap();
        assert_eq!(checks[0].ttl, 120);
    }

    #[test]
    fn test_build_checks_rejects_duplicates() {
        let result = build_checks(vec![record("a", "x", None), record("a", "x", None)], 60);
        assert!(matches!(
            result,
            Err(StatusBoardError::Registry(RegistryError::DuplicateCheck { .. }))
        ));
    }

    #[test]
    fn test_build_checks_allows_same_name_across_projects() {
        let result = build_checks(vec![record("a", "x", None), record("b", "x", None)], 60);
        assert!(result.is_ok());
    }

    #[test]
    fn test_build_checks_rejects_zero_ttl() {
        let result = build_checks(vec![record("a", "x", Some(0))], 60);
        assert!(matches!(
            result,
            Err(StatusBoardError::Registry(RegistryError::InvalidTtl { .. }))
        ));
    }

    #[test]
    fn test_select_all() {
        let checks = build_checks(vec![record("a", "x", None), record("b", "y", None)], 60).unwrap();
        let selected = select(&checks, None, None).unwrap();
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_select_by_project() {
        let checks = build_checks(
            vec![record("a", "x", None), record("a", "y", None), record("b", "z", None)],
            60,
        )
        .unwrap();
        let selected = select(&checks, Some("a"), None).unwrap();
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_select_unknown_project() {
        let checks = build_checks(vec![record("a", "x", None)], 60).unwrap();
        let result = select(&checks, Some("missing"), None);
        assert!(matches!(
            result,
            Err(StatusBoardError::Registry(RegistryError::UnknownProject { .. }))
        ));
    }

    #[test]
    fn test_select_unknown_check() {
        let checks = build_checks(vec![record("a", "x", None)], 60).unwrap();
        let result = select(&checks, Some("a"), Some("missing"));
        assert!(matches!(
            result,
            Err(StatusBoardError::Registry(RegistryError::UnknownCheck { .. }))
        ));
    }

    #[test]
    fn test_check_record_deserialization_with_defaults() {
        let json = r#"{"project": "core", "name": "heartbeat", "url": "https://example.com/h"}"#;
        let record: CheckRecord = serde_json::from_str(json).unwrap();
        assert!(record.ttl.is_none());
        assert!(record.parameters.is_empty());
        assert!(record.description.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_checks_from_mock_registry() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/checks")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"project": "core", "name": "heartbeat", "url": "https://example.com/h", "ttl": 30},
                    {"project": "core", "name": "version", "url": "https://example.com/v"}
                ]"#,
            )
            .create_async()
            .await;

        let client = RegistryClient::new(
            format!("{}/checks", server.url()),
            Duration::from_secs(5),
            60,
        )
        .unwrap();

        let checks = client.fetch_checks().await.unwrap();
        assert_eq!(checks.len(), 2);
        assert_eq!(checks[0].ttl, 30);
        assert_eq!(checks[1].ttl, 60);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_checks_propagates_http_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/checks")
            .with_status(500)
            .create_async()
            .await;

        let client = RegistryClient::new(
            format!("{}/checks", server.url()),
            Duration::from_secs(5),
            60,
        )
        .unwrap();

        // 注册表拉取失败不重试，直接向上传播
        assert!(client.fetch_checks().await.is_err());
    }
}
