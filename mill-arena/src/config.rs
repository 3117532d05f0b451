//! 对战配置
//!
//! 从 JSON 文件读取，缺省字段使用默认值。

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

/// 对战平台配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// 超过该步数判和
    pub max_plies: u32,
    /// 每场比赛的对局数
    pub games_per_match: u32,
    /// 随机种子，None 时每局使用系统熵
    pub seed: Option<u64>,
    /// 覆盖所有 AI 的搜索深度
    pub depth: Option<u8>,
    /// 报告输出目录
    pub output_dir: PathBuf,
    /// 深度分析的最大深度
    pub depth_analysis_max_depth: u8,
    /// 深度分析每层的重复次数
    pub depth_analysis_runs: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            games_per_match: 2,
            seed: None,
            depth: None,
            output_dir: PathBuf::from("results"),
            depth_analysis_max_depth: 4,
            depth_analysis_runs: 3,
        }
    }
}

impl ArenaConfig {
    /// 从文件加载
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// 有路径时加载，否则使用默认配置
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.max_plies > 0, "max_plies must be positive");
        ensure!(self.games_per_match > 0, "games_per_match must be positive");
        ensure!(
            self.depth_analysis_max_depth > 0,
            "depth_analysis_max_depth must be positive"
        );
        ensure!(self.depth_analysis_runs > 0, "depth_analysis_runs must be positive");
        Ok(())
    }
}
