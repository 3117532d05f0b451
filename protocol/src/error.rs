//! 错误类型定义

use thiserror::Error;

use crate::player::{Phase, Player};

/// 规则错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    /// 无效的点位
    #[error("Invalid point: {0}")]
    InvalidPoint(u8),

    /// 目标点已有棋子
    #[error("Point {0} is already occupied")]
    Occupied(u8),

    /// 起点不是己方棋子
    #[error("No piece of player {player} at point {point}")]
    NotOwnPiece { player: Player, point: u8 },

    /// 走子不相邻（非飞子阶段）
    #[error("Point {from} is not adjacent to {to}")]
    NotAdjacent { from: u8, to: u8 },

    /// 当前阶段不允许该走法
    #[error("Move not allowed in {phase:?} phase")]
    WrongPhase { phase: Phase },

    /// 成三后必须吃子
    #[error("Forming a mill at {0} requires a capture")]
    CaptureRequired(u8),

    /// 未成三却指定了吃子
    #[error("Capture given but no mill was formed")]
    UnexpectedCapture,

    /// 吃子目标非法
    #[error("Cannot capture point {0}")]
    InvalidCapture(u8),

    /// 游戏已结束
    #[error("Game is already over")]
    GameOver,

    /// 无效的局面字符串
    #[error("Invalid notation: {reason}")]
    InvalidNotation { reason: String },
}

/// 规则操作结果类型
pub type Result<T> = std::result::Result<T, RuleError>;
