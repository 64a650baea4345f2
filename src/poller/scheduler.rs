//! 轮询调度器模块
//!
//! 为每个检查项维护一个独立的定时轮询任务，任务间无顺序保证

use crate::board::StatusBoard;
use crate::error::{RegistryError, Result};
use crate::poller::fetcher::CheckFetcher;
use crate::registry::{Check, CheckKey};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// 轮询调度器
///
/// 每个检查项对应一个tokio任务：置为loading、拉取结果、写回看板，
/// 完成后等待TTL秒再进入下一轮。已启动的任务一直运行，不会被取消。
pub struct PollScheduler {
    /// 检查结果拉取器
    fetcher: Arc<dyn CheckFetcher>,
    /// 状态看板
    board: Arc<RwLock<StatusBoard>>,
    /// 运行中的任务
    tasks: RwLock<HashMap<CheckKey, JoinHandle<()>>>,
}

impl PollScheduler {
    /// 创建新的轮询调度器
    ///
    /// # 参数
    /// * `fetcher` - 检查结果拉取器
    /// * `board` - 状态看板
    ///
    /// # 返回
    /// * `Self` - 调度器实例
    pub fn new(fetcher: Arc<dyn CheckFetcher>, board: Arc<RwLock<StatusBoard>>) -> Self {
        Self {
            fetcher,
            board,
            tasks: RwLock::new(HashMap::new()),
        }
    }

    /// 执行一个轮询周期
    ///
    /// 进入loading（清空旧结果、禁用手动刷新），拉取结果并写回看板。
    /// 作为关联函数提供，供定时任务和手动刷新共用。
    ///
    /// # 参数
    /// * `fetcher` - 检查结果拉取器
    /// * `board` - 状态看板
    /// * `check` - 检查项
    pub async fn run_cycle(
        fetcher: &Arc<dyn CheckFetcher>,
        board: &Arc<RwLock<StatusBoard>>,
        check: &Check,
    ) {
        let key = check.key();

        {
            let mut board = board.write().await;
            board.set_loading(&key);
        }

        let result = fetcher.fetch(check).await;

        let mut board = board.write().await;
        board.set_result(&key, result);
    }

    /// 为所有检查项启动定时轮询任务
    ///
    /// # 参数
    /// * `checks` - 检查项列表
    pub async fn start(&self, checks: Vec<Check>) {
        info!("启动轮询调度器，检查项数量: {}", checks.len());

        let mut tasks = self.tasks.write().await;
        for check in checks {
            let key = check.key();
            let fetcher = Arc::clone(&self.fetcher);
            let board = Arc::clone(&self.board);

            let task = tokio::spawn(async move {
                debug!("启动检查轮询任务: {}", check.key());
                loop {
                    Self::run_cycle(&fetcher, &board, &check).await;
                    // 下一次自动轮询不早于本次完成后TTL秒
                    tokio::time::sleep(Duration::from_secs(check.ttl)).await;
                }
            });

            tasks.insert(key, task);
        }
    }

    /// 手动刷新一个检查项
    ///
    /// 执行单个轮询周期后结束，不重新调度，也不取消已排定的自动轮询；
    /// 两者可能竞争，后写入看板者胜出。
    ///
    /// # 参数
    /// * `key` - 检查项标识
    ///
    /// # 返回
    /// * `Result<()>` - 检查项不存在时报错
    pub async fn refresh_once(&self, key: &CheckKey) -> Result<()> {
        let check = {
            let board = self.board.read().await;
            board.check(key)
        };

        let Some(check) = check else {
            return Err(RegistryError::UnknownCheck {
                project: key.project.clone(),
                name: key.name.clone(),
            }
            .into());
        };

        debug!("手动刷新检查项: {}", key);

        let fetcher = Arc::clone(&self.fetcher);
        let board = Arc::clone(&self.board);
        tokio::spawn(async move {
            Self::run_cycle(&fetcher, &board, &check).await;
        });

        Ok(())
    }

    /// 运行中的任务数量
    pub async fn running_tasks(&self) -> usize {
        self.tasks.read().await.len()
    }

    /// 停止所有轮询任务
    pub async fn stop(&self) {
        let mut tasks = self.tasks.write().await;
        for (key, task) in tasks.drain() {
            task.abort();
            debug!("停止检查轮询任务: {}", key);
        }
        info!("轮询调度器已停止");
    }
}

impl Drop for PollScheduler {
    fn drop(&mut self) {
        // 调度器销毁时中止所有任务
        if let Ok(mut tasks) = self.tasks.try_write() {
            for (_, task) in tasks.drain() {
                task.abort();
            }
        }
    }
}
