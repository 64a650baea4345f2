//! Web 路由处理函数
//!
//! 实现状态看板页面、JSON API和favicon指示器的处理逻辑

use super::{ApiResponse, AppState};
use crate::board::{Card, Favicon};
use crate::registry::{Check, CheckKey};
use askama::Template;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json},
};
use serde::Serialize;
use tracing::error;

/// 看板模板
#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    projects: Vec<ProjectView>,
    favicon: &'static str,
    success_count: usize,
    failure_count: usize,
    loading_count: usize,
    last_updated: String,
    version: &'static str,
}

/// 模板中的项目分组
struct ProjectView {
    name: String,
    cards: Vec<CardView>,
}

/// 模板中的状态卡片
struct CardView {
    id: String,
    name: String,
    url: String,
    description: String,
    documentation: String,
    parameters: Vec<String>,
    state_class: &'static str,
    datetime: String,
    duration: String,
    payload: String,
    refresh_enabled: bool,
}

impl CardView {
    /// 由看板卡片构建模板视图
    fn from_card(card: &Card) -> Self {
        let check = &card.check;

        // ttl排在参数列表首位，其后为检查参数
        let mut parameters = vec![format!("ttl = {}", check.ttl)];
        for (key, value) in &check.parameters {
            parameters.push(format!("{} = {}", key, value));
        }

        let (datetime, duration, payload) = match &card.result {
            Some(result) => (
                result.datetime.to_rfc3339(),
                format!("{}", result.duration),
                serde_json::to_string_pretty(&result.data).unwrap_or_default(),
            ),
            None => (String::new(), String::new(), String::new()),
        };

        Self {
            id: format!("{}-{}", check.project, check.name),
            name: check.name.clone(),
            url: check.url.clone(),
            description: check.description.clone(),
            documentation: check.documentation.clone(),
            parameters,
            state_class: card.state.as_class(),
            datetime,
            duration,
            payload,
            refresh_enabled: card.refresh_enabled,
        }
    }
}

/// API 状态响应结构
#[derive(Serialize)]
pub struct ApiStatusResponse {
    checks: Vec<ApiCheckStatus>,
    favicon: String,
    total: usize,
    success: usize,
    failure: usize,
    loading: usize,
    last_updated: String,
}

/// API 单个检查项状态结构
#[derive(Serialize)]
struct ApiCheckStatus {
    project: String,
    name: String,
    url: String,
    state: String,
    success: Option<bool>,
    duration: Option<u64>,
    datetime: Option<String>,
    data: Option<serde_json::Value>,
}

/// 看板页面处理函数
pub async fn dashboard(State(state): State<AppState>) -> impl IntoResponse {
    let board = state.board.read().await;

    let projects = board
        .projects()
        .into_iter()
        .map(|(name, cards)| ProjectView {
            name: name.to_string(),
            cards: cards.iter().map(|card| CardView::from_card(card)).collect(),
        })
        .collect();

    let (success_count, failure_count, loading_count) = board.counts();
    let template = DashboardTemplate {
        projects,
        favicon: board.favicon().as_str(),
        success_count,
        failure_count,
        loading_count,
        last_updated: chrono::Utc::now()
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string(),
        version: crate::VERSION,
    };
    drop(board);

    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("模板渲染失败: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "模板渲染失败").into_response()
        }
    }
}

/// 检查项注册表端点处理函数
pub async fn checks(State(state): State<AppState>) -> Json<Vec<Check>> {
    let board = state.board.read().await;
    Json(board.checks())
}

/// API 状态端点处理函数
pub async fn api_status(State(state): State<AppState>) -> Json<ApiStatusResponse> {
    let board = state.board.read().await;

    let checks = board
        .cards()
        .iter()
        .map(|card| ApiCheckStatus {
            project: card.check.project.clone(),
            name: card.check.name.clone(),
            url: card.check.url.clone(),
            state: card.state.as_class().to_string(),
            success: card.result.as_ref().map(|r| r.success),
            duration: card.result.as_ref().map(|r| r.duration),
            datetime: card.result.as_ref().map(|r| r.datetime.to_rfc3339()),
            data: card.result.as_ref().map(|r| r.data.clone()),
        })
        .collect();

    let (success, failure, loading) = board.counts();
    Json(ApiStatusResponse {
        total: board.len(),
        checks,
        favicon: board.favicon().as_str().to_string(),
        success,
        failure,
        loading,
        last_updated: chrono::Utc::now().to_rfc3339(),
    })
}

/// 手动刷新端点处理函数
///
/// 触发一个不重新调度的轮询周期；未知检查项时返回404。
pub async fn refresh_check(
    State(state): State<AppState>,
    Path((project, name)): Path<(String, String)>,
) -> impl IntoResponse {
    let key = CheckKey::new(project, name);

    match state.scheduler.refresh_once(&key).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(format!("已触发刷新: {}", key))),
        )
            .into_response(),
        Err(e) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<String>::error(e.to_string())),
        )
            .into_response(),
    }
}

/// favicon状态指示器处理函数
///
/// 根据看板当前状态返回着色的SVG图标。
pub async fn favicon(State(state): State<AppState>) -> impl IntoResponse {
    let board = state.board.read().await;
    let color = match board.favicon() {
        Favicon::Success => "#4caf50",
        Favicon::Failing => "#f44336",
        Favicon::Loading => "#ff9800",
    };
    drop(board);

    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 16 16"><circle cx="8" cy="8" r="7" fill="{color}"/></svg>"##
    );

    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        svg,
    )
}

/// 心跳端点处理函数
pub async fn heartbeat() -> Json<serde_json::Value> {
    Json(serde_json::json!({}))
}

/// 负载均衡心跳端点处理函数
pub async fn lbheartbeat() -> Json<serde_json::Value> {
    Json(serde_json::json!({}))
}
