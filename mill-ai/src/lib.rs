//! 九子棋 AI 引擎
//!
//! 包含:
//! - 五项特征加权评估函数
//! - Minimax + Alpha-Beta 搜索
//! - 难度分级（搜索深度、随机走子、评估权重）

mod difficulty;
mod error;
mod evaluate;
mod search;

pub use difficulty::{AiConfig, AiStatistics, Difficulty, MillAi};
pub use error::AiError;
pub use evaluate::{count_mills, count_threats, Evaluator, FeatureWeights, Features, Utility};
pub use search::{AiEngine, SearchResult, SearchStats};
