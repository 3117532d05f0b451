//! 博弈模型接口与参考规则实现
//!
//! AI 只通过 [`GameModel`] 访问局面，[`MillModel`] 是标准九子棋规则的实现。

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cells};
use crate::constants::{are_adjacent, is_valid_point, FLYING_THRESHOLD, PIECES_PER_PLAYER};
use crate::error::{Result, RuleError};
use crate::moves::{Move, MoveGenerator, MoveOutcome};
use crate::player::{Phase, Player};

/// 搜索所需的局面接口
///
/// `clone()` 必须是深拷贝：修改副本不得影响原局面。
pub trait GameModel: Clone {
    /// 指定玩家的所有合法走法，无走法时为空
    fn legal_moves(&self, player: Player) -> Vec<Move>;

    /// 就地执行走法（含吃子）
    fn apply_move(&mut self, player: Player, mv: Move) -> Result<MoveOutcome>;

    /// 游戏是否结束
    fn is_game_over(&self) -> bool;

    /// 指定玩家在盘面上的棋子数
    fn count_pieces(&self, player: Player) -> usize;

    /// 指定玩家当前阶段
    fn phase(&self, player: Player) -> Phase;

    /// 24 个点位的占用情况，索引 0 对应 1 号点
    fn board_state(&self) -> Cells;
}

/// 九子棋局面
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MillModel {
    board: Board,
    /// 每方手中未摆的棋子数
    in_hand: [u8; 2],
}

impl MillModel {
    /// 初始局面：空棋盘，双方各 9 子待摆
    pub fn new() -> Self {
        Self {
            board: Board::empty(),
            in_hand: [PIECES_PER_PLAYER; 2],
        }
    }

    /// 从棋盘和手中子数构造
    pub fn from_parts(board: Board, in_hand: [u8; 2]) -> Self {
        Self { board, in_hand }
    }

    /// 棋盘
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// 手中未摆的棋子数
    pub fn in_hand(&self, player: Player) -> u8 {
        self.in_hand[player.index()]
    }

    /// 不考虑被堵死的阶段
    pub fn base_phase(&self, player: Player) -> Phase {
        if self.in_hand(player) > 0 {
            return Phase::Placing;
        }
        match self.board.count(player) {
            n if n < FLYING_THRESHOLD => Phase::Lost,
            n if n == FLYING_THRESHOLD => Phase::Flying,
            _ => Phase::Moving,
        }
    }

    fn validate(&self, player: Player, mv: &Move) -> Result<()> {
        let phase = self.base_phase(player);
        if self.board.get(mv.to).is_some() {
            return Err(RuleError::Occupied(mv.to));
        }

        match (phase, mv.from) {
            (Phase::Placing, None) => {}
            (Phase::Moving, Some(from)) | (Phase::Flying, Some(from)) => {
                if self.board.get(from) != Some(player) {
                    return Err(RuleError::NotOwnPiece { player, point: from });
                }
                if phase == Phase::Moving && !are_adjacent(from, mv.to) {
                    return Err(RuleError::NotAdjacent { from, to: mv.to });
                }
            }
            (phase, _) => return Err(RuleError::WrongPhase { phase }),
        }

        let victim = player.opponent();
        let formed = self.board.forms_mill(player, mv.from, mv.to);
        match mv.capture {
            None if formed && self.board.count(victim) > 0 => {
                Err(RuleError::CaptureRequired(mv.to))
            }
            None => Ok(()),
            Some(_) if !formed => Err(RuleError::UnexpectedCapture),
            Some(c) if MoveGenerator::capturable(&self.board, victim).contains(&c) => Ok(()),
            Some(c) => Err(RuleError::InvalidCapture(c)),
        }
    }
}

impl Default for MillModel {
    fn default() -> Self {
        Self::new()
    }
}

impl GameModel for MillModel {
    fn legal_moves(&self, player: Player) -> Vec<Move> {
        MoveGenerator::generate(self, player)
    }

    fn apply_move(&mut self, player: Player, mv: Move) -> Result<MoveOutcome> {
        if !is_valid_point(mv.to) {
            return Err(RuleError::InvalidPoint(mv.to));
        }
        self.validate(player, &mv)?;

        let formed_mill = self.board.forms_mill(player, mv.from, mv.to);
        match mv.from {
            Some(from) => self.board.set(from, None),
            None => self.in_hand[player.index()] -= 1,
        }
        self.board.set(mv.to, Some(player));
        if let Some(capture) = mv.capture {
            self.board.set(capture, None);
        }

        Ok(MoveOutcome {
            formed_mill,
            captured: mv.capture,
        })
    }

    fn is_game_over(&self) -> bool {
        Player::ALL.iter().any(|&p| self.phase(p) == Phase::Lost)
    }

    fn count_pieces(&self, player: Player) -> usize {
        self.board.count(player)
    }

    /// 局面本身不记录走子方，被堵死的一方总是 `Lost`；
    /// `MillGame` 只在轮到该方时按堵死判负。
    fn phase(&self, player: Player) -> Phase {
        match self.base_phase(player) {
            Phase::Moving | Phase::Flying if !MoveGenerator::has_any_move(self, player) => {
                Phase::Lost
            }
            phase => phase,
        }
    }

    fn board_state(&self) -> Cells {
        self.board.cells()
    }
}
