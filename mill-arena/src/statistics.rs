//! 性能与自对弈分析

use std::time::Instant;

use anyhow::{Context, Result};
use mill_ai::{AiConfig, Difficulty, MillAi};
use protocol::{MillModel, Player};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ArenaConfig;
use crate::tournament::Tournament;

/// 单个深度的测量结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthSample {
    pub depth: u8,
    pub avg_time_ms: f64,
    pub avg_nodes: f64,
    pub avg_pruning_ratio: f64,
}

/// 深度分析报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthReport {
    pub runs: u32,
    pub samples: Vec<DepthSample>,
}

/// 自对弈报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelfPlayReport {
    pub total_games: u32,
    pub draws: u32,
    pub draw_rate: f64,
    pub avg_game_time_ms: f64,
}

/// 从初始局面测量 1..=max_depth 各深度的搜索耗时与节点数
///
/// 使用困难难度的权重，只覆盖深度。
pub fn analyze_depth_performance(max_depth: u8, runs: u32) -> Result<DepthReport> {
    let model = MillModel::new();
    let mut samples = Vec::with_capacity(max_depth as usize);

    for depth in 1..=max_depth {
        let config = AiConfig::from_difficulty(Difficulty::Hard).with_depth(Some(depth));
        let mut total_ms = 0.0;
        let mut total_nodes = 0u64;
        let mut total_ratio = 0.0;

        for _ in 0..runs {
            let mut ai: MillAi<MillModel> =
                MillAi::from_config(config.clone()).context("Invalid depth analysis config")?;

            let start = Instant::now();
            ai.choose_move(&model, Player::One);
            total_ms += start.elapsed().as_secs_f64() * 1000.0;

            let stats = ai.statistics();
            total_nodes += stats.nodes_evaluated;
            total_ratio += stats.pruning_ratio;
        }

        let n = runs.max(1) as f64;
        let sample = DepthSample {
            depth,
            avg_time_ms: total_ms / n,
            avg_nodes: total_nodes as f64 / n,
            avg_pruning_ratio: total_ratio / n,
        };
        info!(
            "Depth {}: {:.2} ms, {:.0} nodes",
            depth, sample.avg_time_ms, sample.avg_nodes
        );
        samples.push(sample);
    }

    Ok(DepthReport { runs, samples })
}

/// 困难对困难的自对弈，统计和棋率
pub fn analyze_self_play(config: &ArenaConfig, games: u32) -> Result<SelfPlayReport> {
    let mut tournament = Tournament::new(config.clone());
    let result = tournament.run_match(Difficulty::Hard, Difficulty::Hard, games)?;

    let draw_rate = if result.total_games == 0 {
        0.0
    } else {
        result.draws as f64 / result.total_games as f64
    };

    Ok(SelfPlayReport {
        total_games: result.total_games,
        draws: result.draws,
        draw_rate,
        avg_game_time_ms: result.avg_game_time_ms,
    })
}
