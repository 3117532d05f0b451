//! 棋谱记录格式
//!
//! 以 JSON 保存对局，便于对战结果复盘

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::game::{GameResult, MillGame};
use crate::moves::Move;
use crate::notation::{Notation, INITIAL_NOTATION};
use crate::player::Player;

/// 棋谱版本
pub const RECORD_VERSION: &str = "1.0";

/// 对局元数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    /// 1 号玩家名
    pub player_one: String,
    /// 2 号玩家名
    pub player_two: String,
    /// 记录时间
    pub recorded_at: DateTime<Utc>,
    /// 对局结果
    pub result: Option<GameResult>,
}

/// 走法记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 走子方编号
    pub player: u8,
    /// `[起点, 目标, 吃子]`，0 表示无
    pub triple: [u8; 3],
}

impl MoveRecord {
    /// 创建新的走法记录
    pub fn new(player: Player, mv: Move) -> Self {
        Self {
            player: player.id(),
            triple: mv.to_triple(),
        }
    }
}

/// 完整的棋谱记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    /// 版本号
    pub version: String,
    /// 元数据
    pub metadata: GameMetadata,
    /// 初始局面
    pub initial_position: String,
    /// 走法列表
    pub moves: Vec<MoveRecord>,
}

impl GameRecord {
    /// 创建新的棋谱记录
    pub fn new(player_one: String, player_two: String) -> Self {
        Self {
            version: RECORD_VERSION.to_string(),
            metadata: GameMetadata {
                player_one,
                player_two,
                recorded_at: Utc::now(),
                result: None,
            },
            initial_position: INITIAL_NOTATION.to_string(),
            moves: Vec::new(),
        }
    }

    /// 从已结束（或进行中）的对局生成
    ///
    /// 假定对局从初始局面开始。
    pub fn from_game(player_one: String, player_two: String, game: &MillGame) -> Self {
        let mut record = Self::new(player_one, player_two);
        for &(player, mv) in game.history() {
            record.add_move(MoveRecord::new(player, mv));
        }
        if let Some(result) = game.result() {
            record.set_result(result);
        }
        record
    }

    /// 从自定义局面创建
    pub fn from_position(player_one: String, player_two: String, game: &MillGame) -> Self {
        let mut record = Self::new(player_one, player_two);
        record.initial_position = Notation::to_string(game.model());
        record
    }

    /// 添加走法
    pub fn add_move(&mut self, mv: MoveRecord) {
        self.moves.push(mv);
    }

    /// 设置对局结果
    pub fn set_result(&mut self, result: GameResult) {
        self.metadata.result = Some(result);
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_record_json() {
        let mut game = MillGame::new();
        game.play(Move::place(1)).unwrap();
        game.play(Move::place(10)).unwrap();

        let mut record = GameRecord::from_game("AI-easy".to_string(), "AI-hard".to_string(), &game);
        record.set_result(GameResult::Draw);

        let json = record.to_json().unwrap();
        let parsed = GameRecord::from_json(&json).unwrap();
        assert_eq!(parsed.metadata.player_one, "AI-easy");
        assert_eq!(parsed.moves.len(), 2);
        assert_eq!(parsed.moves[1].player, 2);
        assert_eq!(parsed.moves[1].triple, [0, 10, 0]);
        assert_eq!(parsed.metadata.result, Some(GameResult::Draw));
        assert_eq!(parsed.initial_position, INITIAL_NOTATION);
    }

    #[test]
    fn test_record_from_custom_position() {
        let model = Notation::parse("1.2..................... 8 8").unwrap();
        let game = MillGame::from_model(model, Player::One);
        let record = GameRecord::from_position("a".to_string(), "b".to_string(), &game);
        assert_eq!(record.initial_position, "1.2..................... 8 8");
        assert!(record.moves.is_empty());
    }
}
