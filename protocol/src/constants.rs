//! 棋盘几何常量
//!
//! 棋盘点位编号（1 起始）：
//!
//! ```text
//!  1 ----------- 2 ----------- 3
//!  |    4 ------ 5 ------ 6    |
//!  |    |    7 - 8 - 9    |    |
//! 10 - 11 - 12       13 - 14 - 15
//!  |    |   16 - 17 - 18  |    |
//!  |   19 ----- 20 ----- 21    |
//! 22 ---------- 23 ---------- 24
//! ```

/// 棋盘点位数
pub const BOARD_SIZE: usize = 24;

/// 每方棋子数
pub const PIECES_PER_PLAYER: u8 = 9;

/// 剩余子数等于该值时进入飞子阶段
pub const FLYING_THRESHOLD: usize = 3;

/// 成三连线（8 条横线 + 8 条纵线）
pub const MILL_TRIPLETS: [[u8; 3]; 16] = [
    // 横线
    [1, 2, 3],
    [4, 5, 6],
    [7, 8, 9],
    [10, 11, 12],
    [13, 14, 15],
    [16, 17, 18],
    [19, 20, 21],
    [22, 23, 24],
    // 纵线
    [1, 10, 22],
    [4, 11, 19],
    [7, 12, 16],
    [2, 5, 8],
    [17, 20, 23],
    [9, 13, 18],
    [6, 14, 21],
    [3, 15, 24],
];

/// 成三连线的位掩码（第 n 号点对应 bit n-1）
pub const MILL_MASKS: [u32; 16] = mill_masks();

/// 相邻点位表，索引为点位编号 - 1
pub const ADJACENCY: [&[u8]; BOARD_SIZE] = [
    &[2, 10],
    &[1, 3, 5],
    &[2, 15],
    &[5, 11],
    &[2, 4, 6, 8],
    &[5, 14],
    &[8, 12],
    &[5, 7, 9],
    &[8, 13],
    &[1, 11, 22],
    &[4, 10, 12, 19],
    &[7, 11, 16],
    &[9, 14, 18],
    &[6, 13, 15, 21],
    &[3, 14, 24],
    &[12, 17],
    &[16, 18, 20],
    &[13, 17],
    &[11, 20],
    &[17, 19, 21, 23],
    &[14, 20],
    &[10, 23],
    &[20, 22, 24],
    &[15, 23],
];

const fn mill_masks() -> [u32; 16] {
    let mut masks = [0u32; 16];
    let mut i = 0;
    while i < MILL_TRIPLETS.len() {
        let [a, b, c] = MILL_TRIPLETS[i];
        masks[i] = (1 << (a - 1)) | (1 << (b - 1)) | (1 << (c - 1));
        i += 1;
    }
    masks
}

/// 点位编号是否合法（1..=24）
pub fn is_valid_point(point: u8) -> bool {
    (1..=BOARD_SIZE as u8).contains(&point)
}

/// 相邻点位，非法点位返回空表
pub fn neighbors(point: u8) -> &'static [u8] {
    (point as usize)
        .checked_sub(1)
        .and_then(|i| ADJACENCY.get(i))
        .copied()
        .unwrap_or(&[])
}

/// 两个点位是否相邻
pub fn are_adjacent(a: u8, b: u8) -> bool {
    neighbors(a).contains(&b)
}
