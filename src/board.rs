//! 状态看板模块
//!
//! 维护以 (project, name) 为键的有序状态卡片集合，
//! 是轮询任务和Web界面之间唯一的共享可变状态

use crate::poller::result::CheckResult;
use crate::registry::{Check, CheckKey};
use serde::Serialize;
use std::collections::HashMap;

/// 卡片状态机
///
/// `idle → loading → (success | failure)`，完成后经TTL回到 `loading`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardState {
    /// 尚未开始轮询
    Idle,
    /// 轮询进行中
    Loading,
    /// 最近一次检查通过
    Success,
    /// 最近一次检查失败
    Failure,
}

impl CardState {
    /// 对应的样式类名
    pub fn as_class(&self) -> &'static str {
        match self {
            CardState::Idle => "idle",
            CardState::Loading => "loading",
            CardState::Success => "success",
            CardState::Failure => "failure",
        }
    }

    /// 判断是否为失败状态
    pub fn is_failure(&self) -> bool {
        matches!(self, CardState::Failure)
    }
}

impl std::fmt::Display for CardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_class())
    }
}

/// 全局favicon指示器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Favicon {
    /// 所有卡片均通过
    Success,
    /// 至少一个卡片失败
    Failing,
    /// 无失败卡片且有轮询进行中
    Loading,
}

impl Favicon {
    /// 指示器名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Favicon::Success => "success",
            Favicon::Failing => "failing",
            Favicon::Loading => "loading",
        }
    }
}

/// 状态卡片，每个检查项一张
#[derive(Debug, Clone)]
pub struct Card {
    /// 检查项
    pub check: Check,
    /// 当前状态
    pub state: CardState,
    /// 最近一次结果，进入loading时清空
    pub result: Option<CheckResult>,
    /// 手动刷新是否可用，轮询进行中时禁用
    pub refresh_enabled: bool,
}

impl Card {
    fn new(check: Check) -> Self {
        Self {
            check,
            state: CardState::Idle,
            result: None,
            refresh_enabled: true,
        }
    }
}

/// 状态看板
///
/// 卡片按注册表顺序排列，以 (project, name) 唯一定位。
#[derive(Debug, Default)]
pub struct StatusBoard {
    /// 有序卡片列表
    cards: Vec<Card>,
    /// (project, name) 到卡片下标的索引
    index: HashMap<CheckKey, usize>,
}

impl StatusBoard {
    /// 创建空看板
    pub fn new() -> Self {
        Self::default()
    }

    /// 从检查项列表重建看板
    ///
    /// 清空现有卡片后按输入顺序重建，每个检查项一张卡片。
    ///
    /// # 参数
    /// * `checks` - 有序检查项列表
    pub fn render(&mut self, checks: Vec<Check>) {
        self.cards.clear();
        self.index.clear();

        for check in checks {
            let key = check.key();
            self.index.insert(key, self.cards.len());
            self.cards.push(Card::new(check));
        }
    }

    /// 卡片数量
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// 看板是否为空
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// 按键查找卡片
    pub fn card(&self, key: &CheckKey) -> Option<&Card> {
        self.index.get(key).map(|&i| &self.cards[i])
    }

    /// 按键查找检查项
    pub fn check(&self, key: &CheckKey) -> Option<Check> {
        self.card(key).map(|card| card.check.clone())
    }

    /// 所有卡片，按注册表顺序
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// 所有检查项，按注册表顺序
    pub fn checks(&self) -> Vec<Check> {
        self.cards.iter().map(|card| card.check.clone()).collect()
    }

    /// 将卡片置为loading状态
    ///
    /// 清空之前的结果并禁用手动刷新。
    ///
    /// # 参数
    /// * `key` - 卡片键
    ///
    /// # 返回
    /// * `bool` - 卡片是否存在
    pub fn set_loading(&mut self, key: &CheckKey) -> bool {
        let Some(&i) = self.index.get(key) else {
            return false;
        };
        let card = &mut self.cards[i];
        card.state = CardState::Loading;
        card.result = None;
        card.refresh_enabled = false;
        true
    }

    /// 写入轮询结果
    ///
    /// 状态由 `result.success` 决定，并重新启用手动刷新。
    /// 定时轮询和手动刷新可能竞争，后写入者胜出。
    ///
    /// # 参数
    /// * `key` - 卡片键
    /// * `result` - 检查结果
    ///
    /// # 返回
    /// * `bool` - 卡片是否存在
    pub fn set_result(&mut self, key: &CheckKey, result: CheckResult) -> bool {
        let Some(&i) = self.index.get(key) else {
            return false;
        };
        let card = &mut self.cards[i];
        card.state = if result.success {
            CardState::Success
        } else {
            CardState::Failure
        };
        card.result = Some(result);
        card.refresh_enabled = true;
        true
    }

    /// 计算favicon指示器状态
    ///
    /// 只要有失败卡片即为failing；否则有进行中的轮询时为loading；
    /// 其余情况为success。
    pub fn favicon(&self) -> Favicon {
        if self.cards.iter().any(|c| c.state.is_failure()) {
            Favicon::Failing
        } else if self.cards.iter().any(|c| c.state == CardState::Loading) {
            Favicon::Loading
        } else {
            Favicon::Success
        }
    }

    /// 按项目分组，保持首次出现顺序
    ///
    /// # 返回
    /// * `Vec<(&str, Vec<&Card>)>` - 项目名到卡片列表
    pub fn projects(&self) -> Vec<(&str, Vec<&Card>)> {
        let mut order: Vec<&str> = Vec::new();
        let mut groups: HashMap<&str, Vec<&Card>> = HashMap::new();

        for card in &self.cards {
            let project = card.check.project.as_str();
            if !groups.contains_key(project) {
                order.push(project);
            }
            groups.entry(project).or_default().push(card);
        }

        order
            .into_iter()
            .map(|p| (p, groups.remove(p).unwrap_or_default()))
            .collect()
    }

    /// 各状态卡片计数 (success, failure, loading)
    pub fn counts(&self) -> (usize, usize, usize) {
        let mut success = 0;
        let mut failure = 0;
        let mut loading = 0;
        for card in &self.cards {
            match card.state {
                CardState::Success => success += 1,
                CardState::Failure => failure += 1,
                CardState::Loading => loading += 1,
                CardState::Idle => {}
            }
        }
        (success, failure, loading)
    }
}
