//! 玩家与阶段定义

use std::fmt;

use serde::{Deserialize, Serialize};

/// 玩家
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// 先手（1 号）
    One,
    /// 后手（2 号）
    Two,
}

impl Player {
    /// 双方，按编号顺序
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    /// 获取对手
    pub fn opponent(&self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// 玩家编号（1 或 2）
    pub fn id(&self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// 从编号解析
    pub fn from_id(id: u8) -> Option<Player> {
        match id {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    /// 数组下标（0 或 1）
    pub fn index(&self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// 游戏阶段（每方独立）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// 摆子
    Placing,
    /// 走子（只能移动到相邻空点）
    Moving,
    /// 飞子（可移动到任意空点）
    Flying,
    /// 已输
    Lost,
}

impl Phase {
    /// 阶段名称
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Placing => "placing",
            Phase::Moving => "moving",
            Phase::Flying => "flying",
            Phase::Lost => "lost",
        }
    }
}
