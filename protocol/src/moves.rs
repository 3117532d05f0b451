//! 走法定义与生成

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::{is_valid_point, neighbors};
use crate::error::{Result, RuleError};
use crate::model::MillModel;
use crate::player::{Phase, Player};

/// 走法
///
/// 点位编号从 1 开始。摆子没有起点；成三时 `capture` 为被吃掉的对方棋子。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起点（摆子时为 None）
    pub from: Option<u8>,
    /// 目标点
    pub to: u8,
    /// 吃子位置
    pub capture: Option<u8>,
}

impl Move {
    /// 摆子
    pub fn place(to: u8) -> Self {
        Self {
            from: None,
            to,
            capture: None,
        }
    }

    /// 走子或飞子
    pub fn slide(from: u8, to: u8) -> Self {
        Self {
            from: Some(from),
            to,
            capture: None,
        }
    }

    /// 附加吃子
    pub fn with_capture(self, capture: u8) -> Self {
        Self {
            capture: Some(capture),
            ..self
        }
    }

    /// 是否为摆子
    pub fn is_placement(&self) -> bool {
        self.from.is_none()
    }

    /// 转换为 `[起点, 目标, 吃子]` 三元组，0 表示无
    pub fn to_triple(&self) -> [u8; 3] {
        [self.from.unwrap_or(0), self.to, self.capture.unwrap_or(0)]
    }

    /// 从三元组解析
    pub fn from_triple(triple: [u8; 3]) -> Result<Self> {
        let [src, dst, capture] = triple;
        if !is_valid_point(dst) {
            return Err(RuleError::InvalidPoint(dst));
        }
        let optional = |point: u8| -> Result<Option<u8>> {
            match point {
                0 => Ok(None),
                p if is_valid_point(p) => Ok(Some(p)),
                p => Err(RuleError::InvalidPoint(p)),
            }
        };
        Ok(Self {
            from: optional(src)?,
            to: dst,
            capture: optional(capture)?,
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move from {} to {}", self.from.unwrap_or(0), self.to)?;
        if let Some(capture) = self.capture {
            write!(f, " (capture {})", capture)?;
        }
        Ok(())
    }
}

/// 走法执行结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// 是否成三
    pub formed_mill: bool,
    /// 被吃掉的点位
    pub captured: Option<u8>,
}

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成指定玩家的所有合法走法
    ///
    /// 顺序：起点升序（摆子在前），其次目标点，最后吃子点。
    pub fn generate(model: &MillModel, player: Player) -> Vec<Move> {
        let board = model.board();
        let mut moves = Vec::with_capacity(32);

        match model.base_phase(player) {
            Phase::Lost => {}
            Phase::Placing => {
                for to in board.empty_points() {
                    Self::push_with_captures(board, player, None, to, &mut moves);
                }
            }
            Phase::Moving => {
                for from in board.points(player) {
                    for &to in neighbors(from) {
                        if board.get(to).is_none() {
                            Self::push_with_captures(board, player, Some(from), to, &mut moves);
                        }
                    }
                }
            }
            Phase::Flying => {
                let empty = board.empty_points();
                for from in board.points(player) {
                    for &to in &empty {
                        Self::push_with_captures(board, player, Some(from), to, &mut moves);
                    }
                }
            }
        }

        moves
    }

    /// 指定玩家是否至少有一步可走（比完整生成更快）
    pub fn has_any_move(model: &MillModel, player: Player) -> bool {
        let board = model.board();
        match model.base_phase(player) {
            Phase::Lost => false,
            Phase::Placing | Phase::Flying => !board.empty_points().is_empty(),
            Phase::Moving => board.points(player).into_iter().any(|from| {
                neighbors(from).iter().any(|&to| board.get(to).is_none())
            }),
        }
    }

    /// 对方可被吃掉的棋子：优先不在三连中的棋子，全部在三连中时可吃任意一子
    pub fn capturable(board: &Board, victim: Player) -> Vec<u8> {
        let pieces = board.points(victim);
        let free: Vec<u8> = pieces
            .iter()
            .copied()
            .filter(|&p| !board.is_in_mill(p, victim))
            .collect();
        if free.is_empty() {
            pieces
        } else {
            free
        }
    }

    fn push_with_captures(
        board: &Board,
        player: Player,
        from: Option<u8>,
        to: u8,
        moves: &mut Vec<Move>,
    ) {
        let base = Move { from, to, capture: None };
        if !board.forms_mill(player, from, to) {
            moves.push(base);
            return;
        }

        let targets = Self::capturable(board, player.opponent());
        if targets.is_empty() {
            moves.push(base);
        } else {
            moves.extend(targets.into_iter().map(|c| base.with_capture(c)));
        }
    }
}
