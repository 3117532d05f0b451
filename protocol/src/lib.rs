//! 九子棋共享协议库
//!
//! 包含:
//! - 玩家、阶段、走法等核心数据结构
//! - 成三连线与相邻关系常量
//! - 博弈模型接口 (GameModel) 与参考规则实现 (MillModel)
//! - 对局管理与棋谱格式

mod board;
mod constants;
mod error;
mod game;
mod model;
mod moves;
mod notation;
mod player;
mod record;

pub use board::{Board, Cells};
pub use constants::*;
pub use error::{Result, RuleError};
pub use game::{GameResult, MillGame};
pub use model::{GameModel, MillModel};
pub use moves::{Move, MoveGenerator, MoveOutcome};
pub use notation::{Notation, INITIAL_NOTATION};
pub use player::{Phase, Player};
pub use record::{GameMetadata, GameRecord, MoveRecord};
