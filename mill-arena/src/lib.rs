//! 九子棋 AI 对战平台
//!
//! 包含:
//! - 对战配置
//! - 比赛与循环赛
//! - 搜索深度与自对弈分析
//! - 报告存储

pub mod config;
pub mod statistics;
pub mod storage;
pub mod tournament;

pub use config::ArenaConfig;
pub use statistics::{
    analyze_depth_performance, analyze_self_play, DepthReport, DepthSample, SelfPlayReport,
};
pub use storage::ReportStore;
pub use tournament::{MatchResult, PlayedGame, Tournament};
