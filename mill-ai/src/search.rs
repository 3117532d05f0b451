//! 搜索引擎
//!
//! 实现固定深度的 Minimax 与 Alpha-Beta 剪枝。
//!
//! 分数始终以 1 号玩家视角计算：1 号取最大，2 号取最小。每个子节点都在局面副本上展开，
//! 不做置换表或任何缓存，重复局面会被重新搜索。
//!
//! 引擎通过 `&mut self` 累计统计数据，同一实例不能被多个线程同时用于搜索；
//! 并行对局请为每局创建独立的引擎。

use std::sync::Arc;

use protocol::{GameModel, Move, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::evaluate::Utility;

/// 搜索统计（每次 `best_move` 开始时清零）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// 递归搜索调用次数（含叶子节点）
    pub nodes_evaluated: u64,
    /// 剪枝次数
    pub pruning_count: u64,
}

impl SearchStats {
    /// 剪枝率
    pub fn pruning_ratio(&self) -> f64 {
        if self.nodes_evaluated == 0 {
            0.0
        } else {
            self.pruning_count as f64 / self.nodes_evaluated as f64
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 搜索结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// 最佳走法，无合法走法时为 None
    pub best_move: Option<Move>,
    /// 1 号视角分数；无走法时 1 号为 -∞、2 号为 +∞
    pub score: f64,
}

/// AI 引擎
pub struct AiEngine<M: GameModel> {
    utility: Arc<dyn Utility<M>>,
    max_depth: u8,
    use_alpha_beta: bool,
    stats: SearchStats,
}

impl<M: GameModel> AiEngine<M> {
    /// 创建新的 AI 引擎（默认启用 Alpha-Beta）
    pub fn new(utility: Arc<dyn Utility<M>>, max_depth: u8) -> Self {
        Self {
            utility,
            max_depth,
            use_alpha_beta: true,
            stats: SearchStats::default(),
        }
    }

    /// 启用或关闭 Alpha-Beta 剪枝
    pub fn with_alpha_beta(mut self, enabled: bool) -> Self {
        self.use_alpha_beta = enabled;
        self
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    pub fn set_max_depth(&mut self, depth: u8) {
        self.max_depth = depth;
    }

    pub fn use_alpha_beta(&self) -> bool {
        self.use_alpha_beta
    }

    /// 上一次搜索的统计
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// 搜索最佳走法
    ///
    /// 按合法走法的生成顺序遍历，分数相同时保留先出现的走法。
    pub fn best_move(&mut self, model: &M, player: Player) -> SearchResult {
        self.stats.reset();

        let maximizing = player == Player::One;
        let worst = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        let moves = model.legal_moves(player);
        if moves.is_empty() {
            debug!("Player {} has no legal moves", player);
            return SearchResult {
                best_move: None,
                score: worst,
            };
        }

        // 根节点已在此展开，深度为 0 时子节点直接评估
        let depth = self.max_depth.saturating_sub(1);
        let mut best_move = None;
        let mut best_score = worst;

        for mv in moves {
            let Some(child) = Self::child(model, player, mv) else {
                continue;
            };

            // 每个根子节点使用完整窗口，分数与无剪枝时完全一致
            let score = self.search(
                &child,
                depth,
                f64::NEG_INFINITY,
                f64::INFINITY,
                !maximizing,
                player.opponent(),
            );
            trace!("root {} -> {}", mv, score);

            let better = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if better {
                best_score = score;
                best_move = Some(mv);
            }
        }

        debug!(
            "Search done: player={}, depth={}, alpha_beta={}, best={:?}, score={}, nodes={}, prunes={}",
            player,
            self.max_depth,
            self.use_alpha_beta,
            best_move.map(|m: Move| m.to_triple()),
            best_score,
            self.stats.nodes_evaluated,
            self.stats.pruning_count,
        );

        SearchResult {
            best_move,
            score: best_score,
        }
    }

    /// 递归评分
    ///
    /// `maximizing` 为 true 时取子节点最大值，否则取最小值；`to_move` 为当前走子方。
    /// 深度为 0 或对局结束时返回 1 号视角的静态评估。
    pub fn search(
        &mut self,
        model: &M,
        depth: u8,
        alpha: f64,
        beta: f64,
        maximizing: bool,
        to_move: Player,
    ) -> f64 {
        if self.use_alpha_beta {
            self.alpha_beta(model, depth, alpha, beta, maximizing, to_move)
        } else {
            self.minimax(model, depth, maximizing, to_move)
        }
    }

    /// 不剪枝的 Minimax
    fn minimax(&mut self, model: &M, depth: u8, maximizing: bool, to_move: Player) -> f64 {
        self.stats.nodes_evaluated += 1;

        if depth == 0 || model.is_game_over() {
            return self.evaluate(model);
        }

        let moves = model.legal_moves(to_move);
        // 无子可动：直接评估，不做让步
        if moves.is_empty() {
            return self.evaluate(model);
        }

        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        for mv in moves {
            let Some(child) = Self::child(model, to_move, mv) else {
                continue;
            };
            let score = self.minimax(&child, depth - 1, !maximizing, to_move.opponent());
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }

        best
    }

    /// Alpha-Beta 搜索
    fn alpha_beta(
        &mut self,
        model: &M,
        depth: u8,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
        to_move: Player,
    ) -> f64 {
        self.stats.nodes_evaluated += 1;

        if depth == 0 || model.is_game_over() {
            return self.evaluate(model);
        }

        let moves = model.legal_moves(to_move);
        if moves.is_empty() {
            return self.evaluate(model);
        }

        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        for mv in moves {
            let Some(child) = Self::child(model, to_move, mv) else {
                continue;
            };
            let score = self.alpha_beta(
                &child,
                depth - 1,
                alpha,
                beta,
                !maximizing,
                to_move.opponent(),
            );

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if beta <= alpha {
                self.stats.pruning_count += 1;
                break;
            }
        }

        best
    }

    /// 固定以 1 号视角评估
    fn evaluate(&self, model: &M) -> f64 {
        self.utility.evaluate(model, Player::One)
    }

    /// 在副本上执行走法
    fn child(model: &M, player: Player, mv: Move) -> Option<M> {
        let mut child = model.clone();
        match child.apply_move(player, mv) {
            Ok(_) => Some(child),
            Err(e) => {
                warn!("Rule engine rejected generated move {}: {}", mv, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::{Evaluator, FeatureWeights};
    use protocol::{MillModel, Notation};

    fn engine(depth: u8) -> AiEngine<MillModel> {
        AiEngine::new(Arc::new(Evaluator::default()), depth)
    }

    #[test]
    fn test_search_initial_position() {
        let model = MillModel::new();
        let mut engine = engine(2);

        let result = engine.best_move(&model, Player::One);
        assert!(result.best_move.is_some());
        assert!(result.score.is_finite());
        // 24 个根子节点，每个展开 23 个叶子
        assert_eq!(engine.stats().nodes_evaluated, 24 + 24 * 23);
    }

    #[test]
    fn test_depth_zero_is_static_evaluation() {
        let model = Notation::parse("11.2..2................. 7 7").unwrap();
        let expected = Evaluator::default().evaluate(&model, Player::One);

        for use_alpha_beta in [true, false] {
            let mut engine = engine(3).with_alpha_beta(use_alpha_beta);
            for maximizing in [true, false] {
                for to_move in Player::ALL {
                    let score = engine.search(
                        &model,
                        0,
                        f64::NEG_INFINITY,
                        f64::INFINITY,
                        maximizing,
                        to_move,
                    );
                    assert_eq!(score, expected);
                }
            }
        }
    }

    #[test]
    fn test_no_move_sentinel() {
        // 1 号在 1、3、22、24 的 4 子被 2 号堵死
        let model = Notation::parse("121......2....2.....2121 0 0").unwrap();
        assert!(model.legal_moves(Player::One).is_empty());

        let mut engine = engine(3);
        let result = engine.best_move(&model, Player::One);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, f64::NEG_INFINITY);

        // 对称局面：2 号被堵死
        let model = Notation::parse("212......1....1.....1212 0 0").unwrap();
        let result = engine.best_move(&model, Player::Two);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, f64::INFINITY);
        assert_eq!(engine.stats().nodes_evaluated, 0);
    }

    #[test]
    fn test_takes_winning_capture() {
        // 1 号飞子成三并吃子，2 号只剩 2 子即告负
        let model = Notation::parse("11.....1.......222...... 0 0").unwrap();
        let mut engine = engine(2);

        let result = engine.best_move(&model, Player::One);
        let mv = result.best_move.unwrap();
        assert!(mv.capture.is_some());

        // 1->5 与 8->3 都能获胜，只检查结果
        let mut after = model.clone();
        after.apply_move(Player::One, mv).unwrap();
        assert!(after.is_game_over());
        assert_eq!(after.count_pieces(Player::Two), 2);
    }

    #[test]
    fn test_player_two_minimizes() {
        // 2 号摆 12 成三吃子，优于去 2 号点堵 1 号
        let model = Notation::parse("1.1.....122............. 6 7").unwrap();
        let mut engine = engine(1);

        let result = engine.best_move(&model, Player::Two);
        let mv = result.best_move.unwrap();
        assert_eq!(mv.to, 12);
        assert!(mv.capture.is_some());
        assert!(result.score < 0.0);
    }

    #[test]
    fn test_stats_reset_between_searches() {
        let model = MillModel::new();
        let mut engine = engine(2);

        engine.best_move(&model, Player::One);
        let first = *engine.stats();
        engine.best_move(&model, Player::One);
        assert_eq!(*engine.stats(), first);
    }

    #[test]
    fn test_pruning_reduces_nodes() {
        let model = MillModel::new();
        let mut pruned = engine(3);
        let mut full = engine(3).with_alpha_beta(false);

        let a = pruned.best_move(&model, Player::One);
        let b = full.best_move(&model, Player::One);

        assert_eq!(a, b);
        assert_eq!(full.stats().pruning_count, 0);
        assert!(pruned.stats().pruning_count > 0);
        assert!(pruned.stats().nodes_evaluated < full.stats().nodes_evaluated);
    }

    #[test]
    fn test_custom_utility() {
        // 只看子数：任何不吃子的走法分数都相同，取第一个
        struct Material;
        impl Utility<MillModel> for Material {
            fn evaluate(&self, model: &MillModel, player: Player) -> f64 {
                model.count_pieces(player) as f64 - model.count_pieces(player.opponent()) as f64
            }
        }

        let model = MillModel::new();
        let mut engine = AiEngine::new(Arc::new(Material), 2);
        let result = engine.best_move(&model, Player::One);
        assert_eq!(result.best_move, Some(Move::place(1)));
        assert_eq!(result.score, 0.0);

        let weights = FeatureWeights::new(1.0, 0.0, 0.0, 0.0, 0.0);
        let mut engine = AiEngine::new(Arc::new(Evaluator::new(weights)), 2);
        assert_eq!(engine.best_move(&model, Player::One), result);
    }

    #[test]
    fn test_pruning_ratio() {
        let stats = SearchStats::default();
        assert_eq!(stats.pruning_ratio(), 0.0);
        let stats = SearchStats {
            nodes_evaluated: 10,
            pruning_count: 4,
        };
        assert!((stats.pruning_ratio() - 0.4).abs() < 1e-12);
    }
}
