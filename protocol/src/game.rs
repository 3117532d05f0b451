//! 对局管理
//!
//! 在局面之上记录走子方、步数和走法历史。

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, RuleError};
use crate::model::{GameModel, MillModel};
use crate::moves::{Move, MoveOutcome};
use crate::player::{Phase, Player};

/// 对局结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// 某方获胜
    Winner(Player),
    /// 和棋（达到步数上限）
    Draw,
}

/// 一盘对局
#[derive(Debug, Clone)]
pub struct MillGame {
    model: MillModel,
    current_player: Player,
    ply: u32,
    history: Vec<(Player, Move)>,
}

impl MillGame {
    /// 新对局，1 号先手
    pub fn new() -> Self {
        Self::from_model(MillModel::new(), Player::One)
    }

    /// 从任意局面开始
    pub fn from_model(model: MillModel, to_move: Player) -> Self {
        Self {
            model,
            current_player: to_move,
            ply: 0,
            history: Vec::new(),
        }
    }

    /// 当前局面
    pub fn model(&self) -> &MillModel {
        &self.model
    }

    /// 当前走子方
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// 已走步数
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// 走法历史
    pub fn history(&self) -> &[(Player, Move)] {
        &self.history
    }

    /// 当前走子方的合法走法
    pub fn legal_moves(&self) -> Vec<Move> {
        self.model.legal_moves(self.current_player)
    }

    /// 走子并交换走子方
    pub fn play(&mut self, mv: Move) -> Result<MoveOutcome> {
        if self.result().is_some() {
            return Err(RuleError::GameOver);
        }

        let player = self.current_player;
        let outcome = self.model.apply_move(player, mv)?;
        self.history.push((player, mv));
        self.current_player = player.opponent();
        self.ply += 1;

        if let Some(result) = self.result() {
            debug!("对局结束: {:?}, 共 {} 步", result, self.ply);
        }
        Ok(outcome)
    }

    /// 对局结果：任一方子数不足，或走子方无棋可走
    ///
    /// 不走子的一方被堵死不算输，对方可能在本步为其让出空位。
    pub fn result(&self) -> Option<GameResult> {
        if let Some(loser) = Player::ALL
            .into_iter()
            .find(|&p| self.model.base_phase(p) == Phase::Lost)
        {
            return Some(GameResult::Winner(loser.opponent()));
        }
        if self.legal_moves().is_empty() {
            return Some(GameResult::Winner(self.current_player.opponent()));
        }
        None
    }
}

impl Default for MillGame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::Notation;

    #[test]
    fn test_turns_alternate() {
        let mut game = MillGame::new();
        assert_eq!(game.current_player(), Player::One);

        game.play(Move::place(1)).unwrap();
        assert_eq!(game.current_player(), Player::Two);
        game.play(Move::place(2)).unwrap();
        assert_eq!(game.current_player(), Player::One);

        assert_eq!(game.ply(), 2);
        assert_eq!(game.history()[1], (Player::Two, Move::place(2)));
    }

    #[test]
    fn test_illegal_move_keeps_turn() {
        let mut game = MillGame::new();
        game.play(Move::place(1)).unwrap();
        assert!(game.play(Move::place(1)).is_err());
        assert_eq!(game.current_player(), Player::Two);
        assert_eq!(game.ply(), 1);
    }

    #[test]
    fn test_capture_to_win() {
        // 1 号飞子阶段成三，吃掉 2 号第三子后 2 号只剩 2 子
        let model = Notation::parse("11.....1.......222...... 0 0").unwrap();
        let mut game = MillGame::from_model(model, Player::One);
        assert_eq!(game.result(), None);

        game.play(Move::slide(8, 3).with_capture(16)).unwrap();
        assert_eq!(game.result(), Some(GameResult::Winner(Player::One)));
        assert_eq!(game.play(Move::slide(17, 16)), Err(RuleError::GameOver));
    }

    #[test]
    fn test_blockade_only_loses_on_own_turn() {
        // 2 号四子全被堵死
        let model = Notation::parse("212......1....1.....1212 0 0").unwrap();

        let blocked = MillGame::from_model(model.clone(), Player::Two);
        assert_eq!(blocked.result(), Some(GameResult::Winner(Player::One)));

        // 轮到 1 号时对局继续，1 号让出 2 号点后 2 号可以走子
        let mut game = MillGame::from_model(model, Player::One);
        assert_eq!(game.result(), None);
        game.play(Move::slide(2, 5)).unwrap();
        assert_eq!(game.result(), None);
        assert!(game.legal_moves().contains(&Move::slide(1, 2)));
    }
}
