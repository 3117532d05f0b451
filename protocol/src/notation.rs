//! 局面文本格式
//!
//! 格式：`<24 个点位> <1 号手中子数> <2 号手中子数>`，点位用 `.`、`1`、`2` 表示。
//!
//! 示例：
//! `11.......22............. 7 7`

use crate::board::Board;
use crate::constants::{BOARD_SIZE, PIECES_PER_PLAYER};
use crate::error::RuleError;
use crate::model::MillModel;
use crate::player::Player;

/// 初始局面
pub const INITIAL_NOTATION: &str = "........................ 9 9";

/// 局面文本格式处理
pub struct Notation;

impl Notation {
    /// 解析局面字符串
    ///
    /// 手中子数缺省为 0。
    pub fn parse(text: &str) -> Result<MillModel, RuleError> {
        let parts: Vec<&str> = text.split_whitespace().collect();
        let Some(cells) = parts.first() else {
            return Err(RuleError::InvalidNotation {
                reason: "Empty notation string".to_string(),
            });
        };
        if parts.len() > 3 {
            return Err(RuleError::InvalidNotation {
                reason: format!("Expected at most 3 fields, got {}", parts.len()),
            });
        }

        let board = Self::parse_board(cells)?;
        let in_hand = [
            Self::parse_in_hand(parts.get(1).copied())?,
            Self::parse_in_hand(parts.get(2).copied())?,
        ];

        Ok(MillModel::from_parts(board, in_hand))
    }

    fn parse_board(cells: &str) -> Result<Board, RuleError> {
        let count = cells.chars().count();
        if count != BOARD_SIZE {
            return Err(RuleError::InvalidNotation {
                reason: format!("Expected {} points, got {}", BOARD_SIZE, count),
            });
        }

        let mut board = Board::empty();
        for (i, c) in cells.chars().enumerate() {
            let piece = match c {
                '.' | '0' => None,
                '1' => Some(Player::One),
                '2' => Some(Player::Two),
                other => {
                    return Err(RuleError::InvalidNotation {
                        reason: format!("Invalid point character: {}", other),
                    })
                }
            };
            board.set(i as u8 + 1, piece);
        }

        Ok(board)
    }

    fn parse_in_hand(field: Option<&str>) -> Result<u8, RuleError> {
        let Some(field) = field else {
            return Ok(0);
        };
        match field.parse::<u8>() {
            Ok(n) if n <= PIECES_PER_PLAYER => Ok(n),
            _ => Err(RuleError::InvalidNotation {
                reason: format!("Invalid in-hand count: {}", field),
            }),
        }
    }

    /// 将局面转换为字符串
    pub fn to_string(model: &MillModel) -> String {
        let cells: String = model
            .board()
            .cells()
            .iter()
            .map(|cell| match cell {
                None => '.',
                Some(Player::One) => '1',
                Some(Player::Two) => '2',
            })
            .collect();
        format!(
            "{} {} {}",
            cells,
            model.in_hand(Player::One),
            model.in_hand(Player::Two)
        )
    }
}
