//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::constants::{is_valid_point, BOARD_SIZE, MILL_MASKS};
use crate::player::Player;

/// 全部 24 个点位的掩码
const FULL_MASK: u32 = (1 << BOARD_SIZE) - 1;

/// 棋盘格子状态，索引 0 对应 1 号点
pub type Cells = [Option<Player>; BOARD_SIZE];

/// 棋盘
///
/// 每方一个 24 位掩码，第 n 号点对应 bit n-1。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    masks: [u32; 2],
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self::default()
    }

    /// 获取指定点位的棋子
    pub fn get(&self, point: u8) -> Option<Player> {
        if !is_valid_point(point) {
            return None;
        }
        let bit = Self::bit(point);
        Player::ALL
            .into_iter()
            .find(|p| self.masks[p.index()] & bit != 0)
    }

    /// 设置指定点位的棋子，非法点位被忽略
    pub fn set(&mut self, point: u8, piece: Option<Player>) {
        if !is_valid_point(point) {
            return;
        }
        let bit = Self::bit(point);
        self.masks[0] &= !bit;
        self.masks[1] &= !bit;
        if let Some(player) = piece {
            self.masks[player.index()] |= bit;
        }
    }

    /// 指定玩家的棋子掩码
    pub fn mask(&self, player: Player) -> u32 {
        self.masks[player.index()]
    }

    /// 空点掩码
    pub fn empty_mask(&self) -> u32 {
        !(self.masks[0] | self.masks[1]) & FULL_MASK
    }

    /// 指定玩家在盘面上的棋子数
    pub fn count(&self, player: Player) -> usize {
        self.mask(player).count_ones() as usize
    }

    /// 指定玩家的所有棋子位置（升序）
    pub fn points(&self, player: Player) -> Vec<u8> {
        Self::mask_points(self.mask(player))
    }

    /// 所有空点（升序）
    pub fn empty_points(&self) -> Vec<u8> {
        Self::mask_points(self.empty_mask())
    }

    /// 指定点位的棋子是否处于三连中
    pub fn is_in_mill(&self, point: u8, player: Player) -> bool {
        if !is_valid_point(point) {
            return false;
        }
        let mask = self.mask(player);
        let bit = Self::bit(point);
        MILL_MASKS
            .iter()
            .any(|&mill| mill & bit != 0 && mill & mask == mill)
    }

    /// 将 `from` 处棋子（摆子时为 None）移到 `to` 后是否形成新的三连
    pub fn forms_mill(&self, player: Player, from: Option<u8>, to: u8) -> bool {
        if !is_valid_point(to) {
            return false;
        }
        let mut mask = self.mask(player);
        if let Some(from) = from.filter(|&p| is_valid_point(p)) {
            mask &= !Self::bit(from);
        }
        let bit = Self::bit(to);
        mask |= bit;
        MILL_MASKS
            .iter()
            .any(|&mill| mill & bit != 0 && mill & mask == mill)
    }

    /// 按点位顺序导出全部格子
    pub fn cells(&self) -> Cells {
        let mut cells = [None; BOARD_SIZE];
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = self.get(i as u8 + 1);
        }
        cells
    }

    fn bit(point: u8) -> u32 {
        1 << (point - 1)
    }

    fn mask_points(mut mask: u32) -> Vec<u8> {
        let mut points = Vec::with_capacity(mask.count_ones() as usize);
        while mask != 0 {
            points.push(mask.trailing_zeros() as u8 + 1);
            mask &= mask - 1;
        }
        points
    }
}
