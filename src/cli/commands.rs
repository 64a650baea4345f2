//! 命令执行逻辑
//!
//! 实现serve、check、validate子命令

use crate::board::StatusBoard;
use crate::config::{Config, ConfigLoader, TomlConfigLoader};
use crate::error::{Result, StatusBoardError};
use crate::poller::{CheckFetcher, HttpCheckFetcher, PollScheduler};
use crate::registry::{select, RegistryClient};
use crate::web::{AppState, WebServer};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;

/// 启动状态看板服务
///
/// 拉取一次注册表（失败时直接退出），渲染看板，
/// 为每个检查项启动独立的轮询任务，然后启动Web服务器。
///
/// # 参数
/// * `config` - 应用配置
///
/// # 返回
/// * `Result<()>` - 运行结果
pub async fn run_serve(config: Config) -> Result<()> {
    let timeout = Duration::from_secs(config.registry.request_timeout_seconds);

    // 注册表在启动时拉取一次，拉取失败不重试，错误直接向上传播
    let client = RegistryClient::new(
        config.registry.endpoint.clone(),
        timeout,
        config.registry.default_ttl,
    )?;
    let checks = client.fetch_checks().await?;

    let mut board = StatusBoard::new();
    board.render(checks.clone());
    let board = Arc::new(RwLock::new(board));

    let fetcher: Arc<dyn CheckFetcher> = Arc::new(HttpCheckFetcher::new(timeout)?);
    let scheduler = Arc::new(PollScheduler::new(fetcher, Arc::clone(&board)));
    scheduler.start(checks).await;

    let state = AppState {
        board,
        scheduler: Arc::clone(&scheduler),
    };
    let server = WebServer::new(config.server.clone(), state);
    let result = server.start().await;

    scheduler.stop().await;
    result
}

/// 执行一次性检查
///
/// 拉取注册表，筛选检查项并各执行一次，按筛选顺序打印结果。
///
/// # 参数
/// * `config` - 应用配置
/// * `project` - 项目名（可选）
/// * `name` - 检查项名称（可选）
///
/// # 返回
/// * `Result<i32>` - 进程退出码：全部通过0，存在失败1，筛选无匹配2
pub async fn run_check(
    config: Config,
    project: Option<&str>,
    name: Option<&str>,
) -> Result<i32> {
    let timeout = Duration::from_secs(config.registry.request_timeout_seconds);

    let client = RegistryClient::new(
        config.registry.endpoint.clone(),
        timeout,
        config.registry.default_ttl,
    )?;
    let checks = client.fetch_checks().await?;

    let selected = match select(&checks, project, name) {
        Ok(selected) => selected,
        Err(e) => {
            eprintln!("{e}");
            return Ok(2);
        }
    };

    let fetcher = HttpCheckFetcher::new(timeout)?;
    let futures = selected.iter().map(|check| fetcher.fetch(check));
    let results = futures::future::join_all(futures).await;

    let mut all_success = true;
    for (check, result) in selected.iter().zip(results) {
        println!("{} ({})", check.key(), check.description);
        println!("{}", result.to_pretty_json()?);
        all_success &= result.success;
    }

    Ok(if all_success { 0 } else { 1 })
}

/// 验证配置文件
///
/// # 参数
/// * `config_path` - 配置文件路径
///
/// # 返回
/// * `Result<()>` - 验证结果
pub async fn run_validate<P: AsRef<Path> + Send>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let loader = TomlConfigLoader::new(true);
    let config = loader.load_from_file(path).await?;

    info!("配置文件验证通过: {}", path.display());
    println!("配置有效");
    println!("  注册表端点: {}", config.registry.endpoint);
    println!("  默认TTL: {}秒", config.registry.default_ttl);
    println!(
        "  监听地址: {}:{}",
        config.server.bind_address, config.server.port
    );

    Ok(())
}

/// 加载配置文件
///
/// # 参数
/// * `config_path` - 配置文件路径
///
/// # 返回
/// * `Result<Config>` - 加载的配置
pub async fn load_config<P: AsRef<Path> + Send>(config_path: P) -> Result<Config> {
    let loader = TomlConfigLoader::new(true);
    loader.load_from_file(config_path).await
}

/// 将顶层错误映射为进程退出码
pub fn exit_code_for(error: &StatusBoardError) -> i32 {
    match error {
        StatusBoardError::Config(_) => 2,
        _ => 1,
    }
}
