//! 局面评估函数
//!
//! 评分为五项特征差值的加权和：子数、成三、机动性、摆子阶段加成、潜在成三。

use protocol::{Cells, GameModel, Phase, Player, MILL_TRIPLETS};
use serde::{Deserialize, Serialize};

use crate::error::AiError;

/// 评估权重
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeights {
    /// 子数差
    pub piece: f64,
    /// 成三数差
    pub mill: f64,
    /// 合法走法数差
    pub mobility: f64,
    /// 处于摆子阶段的加成
    pub phase_bonus: f64,
    /// 潜在成三数差
    pub threat: f64,
}

impl FeatureWeights {
    pub const fn new(piece: f64, mill: f64, mobility: f64, phase_bonus: f64, threat: f64) -> Self {
        Self {
            piece,
            mill,
            mobility,
            phase_bonus,
            threat,
        }
    }

    /// 所有权重必须有限且非负
    pub fn validate(&self) -> Result<(), AiError> {
        let named = [
            ("piece", self.piece),
            ("mill", self.mill),
            ("mobility", self.mobility),
            ("phase_bonus", self.phase_bonus),
            ("threat", self.threat),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(AiError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self::new(10.0, 50.0, 2.0, 5.0, 10.0)
    }
}

/// 可注入的评估策略
///
/// 分数越高对 `player` 越有利。
pub trait Utility<M: GameModel>: Send + Sync {
    fn evaluate(&self, model: &M, player: Player) -> f64;
}

/// 原始特征（己方减对方）
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Features {
    pub pieces: i32,
    pub mills: i32,
    pub mobility: i32,
    /// 评估方是否处于摆子阶段
    pub placing: bool,
    pub threats: i32,
}

impl Features {
    /// 提取 `player` 视角的特征
    pub fn extract<M: GameModel>(model: &M, player: Player) -> Self {
        let opponent = player.opponent();
        let cells = model.board_state();
        let diff = |own: usize, opp: usize| own as i32 - opp as i32;

        Self {
            pieces: diff(model.count_pieces(player), model.count_pieces(opponent)),
            mills: diff(count_mills(&cells, player), count_mills(&cells, opponent)),
            mobility: diff(
                model.legal_moves(player).len(),
                model.legal_moves(opponent).len(),
            ),
            placing: model.phase(player) == Phase::Placing,
            threats: diff(count_threats(&cells, player), count_threats(&cells, opponent)),
        }
    }

    /// 加权求和
    pub fn score(&self, weights: &FeatureWeights) -> f64 {
        let phase = if self.placing { weights.phase_bonus } else { 0.0 };
        self.pieces as f64 * weights.piece
            + self.mills as f64 * weights.mill
            + self.mobility as f64 * weights.mobility
            + phase
            + self.threats as f64 * weights.threat
    }
}

/// 加权评估器
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    weights: FeatureWeights,
}

impl Evaluator {
    pub fn new(weights: FeatureWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &FeatureWeights {
        &self.weights
    }
}

impl<M: GameModel> Utility<M> for Evaluator {
    fn evaluate(&self, model: &M, player: Player) -> f64 {
        Features::extract(model, player).score(&self.weights)
    }
}

/// 读取 1 起始点位，越界返回 None
fn cell(cells: &Cells, point: u8) -> Option<Option<Player>> {
    let index = (point as usize).checked_sub(1)?;
    cells.get(index).copied()
}

/// 已成三的连线数
pub fn count_mills(cells: &Cells, player: Player) -> usize {
    MILL_TRIPLETS
        .iter()
        .filter(|triplet| triplet.iter().all(|&p| cell(cells, p) == Some(Some(player))))
        .count()
}

/// 两子一空的连线数
pub fn count_threats(cells: &Cells, player: Player) -> usize {
    MILL_TRIPLETS
        .iter()
        .filter(|triplet| {
            let owned = triplet
                .iter()
                .filter(|&&p| cell(cells, p) == Some(Some(player)))
                .count();
            let empty = triplet
                .iter()
                .filter(|&&p| cell(cells, p) == Some(None))
                .count();
            owned == 2 && empty == 1
        })
        .count()
}
