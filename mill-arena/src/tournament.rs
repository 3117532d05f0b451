//! AI 对战与循环赛

use std::fmt::Write as _;
use std::time::Instant;

use anyhow::{Context, Result};
use mill_ai::{AiConfig, Difficulty, MillAi};
use protocol::{GameRecord, GameResult, MillGame, MillModel, MoveRecord, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ArenaConfig;

/// 一场比赛的结果（ai1 执 1 号先手）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub ai1: Difficulty,
    pub ai2: Difficulty,
    pub ai1_wins: u32,
    pub ai2_wins: u32,
    pub draws: u32,
    pub total_games: u32,
    pub avg_game_time_ms: f64,
    pub game_times_ms: Vec<u64>,
}

/// 单盘对局
#[derive(Debug, Clone)]
pub struct PlayedGame {
    pub result: GameResult,
    pub plies: u32,
    pub record: GameRecord,
}

/// 对战管理器
pub struct Tournament {
    config: ArenaConfig,
    history: Vec<MatchResult>,
    records: Vec<GameRecord>,
    games_played: u64,
}

impl Tournament {
    pub fn new(config: ArenaConfig) -> Self {
        Self {
            config,
            history: Vec::new(),
            records: Vec::new(),
            games_played: 0,
        }
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// 已完成的比赛
    pub fn history(&self) -> &[MatchResult] {
        &self.history
    }

    /// 所有对局的棋谱
    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    /// 按难度创建 AI，应用深度覆盖与种子
    fn make_ai(&self, difficulty: Difficulty, slot: u64) -> Result<MillAi<MillModel>> {
        let config = AiConfig::from_difficulty(difficulty).with_depth(self.config.depth);
        let ai = MillAi::from_config(config)
            .with_context(|| format!("Invalid AI config for {}", difficulty))?;
        Ok(match self.config.seed {
            Some(seed) => ai.with_seed(seed.wrapping_add(self.games_played * 2 + slot)),
            None => ai,
        })
    }

    /// 进行一场比赛
    pub fn run_match(
        &mut self,
        ai1: Difficulty,
        ai2: Difficulty,
        games: u32,
    ) -> Result<MatchResult> {
        info!("Match {} vs {}: {} games", ai1, ai2, games);

        let mut result = MatchResult {
            ai1,
            ai2,
            ai1_wins: 0,
            ai2_wins: 0,
            draws: 0,
            total_games: games,
            avg_game_time_ms: 0.0,
            game_times_ms: Vec::with_capacity(games as usize),
        };

        for game_num in 1..=games {
            let mut first = self.make_ai(ai1, 0)?;
            let mut second = self.make_ai(ai2, 1)?;

            let start = Instant::now();
            let played = self.play_game(&mut first, &mut second)?;
            let elapsed = start.elapsed().as_millis() as u64;
            self.games_played += 1;

            match played.result {
                GameResult::Winner(Player::One) => result.ai1_wins += 1,
                GameResult::Winner(Player::Two) => result.ai2_wins += 1,
                GameResult::Draw => result.draws += 1,
            }
            info!(
                "Game {}/{}: {:?} after {} plies ({} ms)",
                game_num, games, played.result, played.plies, elapsed
            );

            result.game_times_ms.push(elapsed);
            self.records.push(played.record);
        }

        if !result.game_times_ms.is_empty() {
            let total: u64 = result.game_times_ms.iter().sum();
            result.avg_game_time_ms = total as f64 / result.game_times_ms.len() as f64;
        }

        self.history.push(result.clone());
        Ok(result)
    }

    /// 对局直到分出胜负或达到步数上限
    pub fn play_game(
        &self,
        ai1: &mut MillAi<MillModel>,
        ai2: &mut MillAi<MillModel>,
    ) -> Result<PlayedGame> {
        let mut game = MillGame::new();
        let mut record = GameRecord::new(
            format!("AI-{}", ai1.difficulty()),
            format!("AI-{}", ai2.difficulty()),
        );

        let result = loop {
            if let Some(result) = game.result() {
                break result;
            }
            if game.ply() >= self.config.max_plies {
                debug!("Ply limit {} reached", self.config.max_plies);
                break GameResult::Draw;
            }

            let player = game.current_player();
            let ai = match player {
                Player::One => &mut *ai1,
                Player::Two => &mut *ai2,
            };
            let Some(mv) = ai.choose_move(game.model(), player) else {
                break GameResult::Winner(player.opponent());
            };

            game.play(mv)
                .with_context(|| format!("AI produced an illegal move: {}", mv))?;
            record.add_move(MoveRecord::new(player, mv));
        };

        record.set_result(result);
        Ok(PlayedGame {
            result,
            plies: game.ply(),
            record,
        })
    }

    /// 循环赛：每对不同难度进行一场比赛
    pub fn run_round_robin(&mut self, difficulties: &[Difficulty]) -> Result<Vec<MatchResult>> {
        let games = self.config.games_per_match;
        let mut results = Vec::new();

        for (i, &first) in difficulties.iter().enumerate() {
            for &second in &difficulties[i + 1..] {
                if first == second {
                    continue;
                }
                results.push(self.run_match(first, second, games)?);
            }
        }

        Ok(results)
    }

    /// 文本汇总
    pub fn summary(&self) -> String {
        let mut out = String::from("=== Tournament Results ===\n");
        for m in &self.history {
            let _ = writeln!(out, "\n{} vs {}:", m.ai1, m.ai2);
            let _ = writeln!(out, "  AI1 wins: {}", m.ai1_wins);
            let _ = writeln!(out, "  AI2 wins: {}", m.ai2_wins);
            let _ = writeln!(out, "  Draws: {}", m.draws);
            let _ = writeln!(out, "  Avg game time: {:.2}s", m.avg_game_time_ms / 1000.0);
        }
        out
    }
}
