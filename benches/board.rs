//! 状态看板基准测试
//!
//! 测试看板渲染、favicon计算和项目分组的性能

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use status_board::board::StatusBoard;
use status_board::poller::CheckResult;
use status_board::registry::Check;
use std::collections::BTreeMap;

/// 构造指定数量的检查项，分布在10个项目下
fn make_checks(count: usize) -> Vec<Check> {
    (0..count)
        .map(|i| Check {
            project: format!("project-{}", i % 10),
            name: format!("check-{i}"),
            url: format!("https://dashboard.example.com/checks/{i}"),
            ttl: 60,
            parameters: BTreeMap::new(),
            description: "Benchmark check".to_string(),
            documentation: String::new(),
        })
        .collect()
}

/// 构造已完成一轮轮询的看板
fn polled_board(count: usize) -> StatusBoard {
    let checks = make_checks(count);
    let mut board = StatusBoard::new();
    board.render(checks.clone());
    for (i, check) in checks.iter().enumerate() {
        board.set_result(
            &check.key(),
            CheckResult {
                success: i % 7 != 0,
                data: serde_json::json!({"status": "ok"}),
                duration: 42,
                datetime: Utc::now(),
            },
        );
    }
    board
}

/// 看板渲染基准测试
fn board_render_benchmark(c: &mut Criterion) {
    let checks = make_checks(100);

    c.bench_function("board_render_100", |b| {
        b.iter(|| {
            let mut board = StatusBoard::new();
            board.render(checks.clone());
            black_box(board)
        });
    });

    c.bench_function("board_set_result_100", |b| {
        let mut board = StatusBoard::new();
        board.render(checks.clone());
        let keys: Vec<_> = checks.iter().map(|check| check.key()).collect();
        let result = CheckResult {
            success: true,
            data: serde_json::json!({"status": "ok"}),
            duration: 42,
            datetime: Utc::now(),
        };
        b.iter(|| {
            for key in &keys {
                board.set_result(key, result.clone());
            }
        });
    });
}

/// 看板查询基准测试
fn board_query_benchmark(c: &mut Criterion) {
    let board = polled_board(100);

    c.bench_function("board_favicon_100", |b| {
        b.iter(|| black_box(board.favicon()));
    });

    c.bench_function("board_projects_100", |b| {
        b.iter(|| black_box(board.projects()));
    });

    c.bench_function("board_counts_100", |b| {
        b.iter(|| black_box(board.counts()));
    });
}

criterion_group!(benches, board_render_benchmark, board_query_benchmark);
criterion_main!(benches);
