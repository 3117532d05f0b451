//! AI 配置错误

use thiserror::Error;

/// AI 错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AiError {
    /// 未知难度名
    #[error("Unknown difficulty: {0} (expected easy, medium or hard)")]
    UnknownDifficulty(String),

    /// 随机走子概率越界
    #[error("Random move probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    /// 评估权重非法
    #[error("Weight `{name}` must be finite and non-negative, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },
}
