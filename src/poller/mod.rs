//! 轮询模块
//!
//! 提供检查结果拉取和按TTL调度的轮询任务管理

pub mod fetcher;
pub mod result;
pub mod scheduler;

pub use fetcher::{CheckFetcher, HttpCheckFetcher};
pub use result::CheckResult;
pub use scheduler::PollScheduler;
