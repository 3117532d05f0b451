//! 报告存储
//!
//! 将对战报告与棋谱以 JSON 保存到输出目录

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

/// 报告存储管理器
pub struct ReportStore {
    output_dir: PathBuf,
}

impl ReportStore {
    /// 创建存储管理器，目录不存在时自动创建
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();

        if !output_dir.exists() {
            fs::create_dir_all(&output_dir)
                .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;
        }

        Ok(Self { output_dir })
    }

    /// 保存报告，返回文件名（不含路径）
    pub fn save<T: Serialize + ?Sized>(&self, kind: &str, report: &T) -> Result<String> {
        let filename = generate_filename(&Utc::now(), kind);
        let filepath = self.output_dir.join(&filename);

        let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        fs::write(&filepath, json)
            .with_context(|| format!("Failed to write file: {:?}", filepath))?;

        info!("Saved report to {:?}", filepath);
        Ok(filename)
    }

    /// 加载报告
    pub fn load<T: DeserializeOwned>(&self, filename: &str) -> Result<T> {
        let filepath = self.output_dir.join(filename);

        if !filepath.exists() {
            anyhow::bail!("Report file does not exist: {}", filename);
        }

        let content = fs::read_to_string(&filepath)
            .with_context(|| format!("Failed to read file: {:?}", filepath))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse report: {}", filename))
    }

    /// 列出所有报告文件名，按名称排序
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.output_dir)
            .with_context(|| format!("Failed to read output directory: {:?}", self.output_dir))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry.context("Failed to read directory entry")?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// 生成文件名
fn generate_filename(timestamp: &DateTime<Utc>, kind: &str) -> String {
    let timestamp_str = timestamp.format("%Y%m%d_%H%M%S_%3f").to_string();
    format!("{}_{}.json", sanitize_filename(kind), timestamp_str)
}

/// 清理文件名中的特殊字符
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | ' ' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim_matches('_')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournament::MatchResult;
    use mill_ai::Difficulty;
    use protocol::{GameRecord, GameResult, Move, MoveRecord, Player};
    use tempfile::TempDir;

    fn create_test_store() -> (ReportStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = ReportStore::new(temp_dir.path().join("results")).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_creates_directory() {
        let (store, _temp_dir) = create_test_store();
        assert!(store.output_dir().is_dir());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_match() {
        let (store, _temp_dir) = create_test_store();
        let result = MatchResult {
            ai1: Difficulty::Easy,
            ai2: Difficulty::Hard,
            ai1_wins: 0,
            ai2_wins: 2,
            draws: 0,
            total_games: 2,
            avg_game_time_ms: 150.0,
            game_times_ms: vec![100, 200],
        };

        let filename = store.save("match", &result).unwrap();
        assert!(filename.starts_with("match_"));
        assert!(filename.ends_with(".json"));

        let loaded: MatchResult = store.load(&filename).unwrap();
        assert_eq!(loaded, result);
        assert_eq!(store.list().unwrap(), vec![filename]);
    }

    #[test]
    fn test_save_game_record() {
        let (store, _temp_dir) = create_test_store();
        let mut record = GameRecord::new("AI-easy".to_string(), "AI-hard".to_string());
        record.add_move(MoveRecord::new(Player::One, Move::place(5)));
        record.set_result(GameResult::Winner(Player::Two));

        let filename = store.save("game", &record).unwrap();
        let loaded: GameRecord = store.load(&filename).unwrap();
        assert_eq!(loaded.moves.len(), 1);
        assert_eq!(loaded.metadata.result, Some(GameResult::Winner(Player::Two)));
    }

    #[test]
    fn test_load_missing() {
        let (store, _temp_dir) = create_test_store();
        assert!(store.load::<MatchResult>("nope.json").is_err());
    }

    #[test]
    fn test_generate_filename() {
        let timestamp = DateTime::parse_from_rfc3339("2026-01-09T15:30:22Z")
            .unwrap()
            .with_timezone(&Utc);

        let filename = generate_filename(&timestamp, "easy vs hard");
        assert_eq!(filename, "easy_vs_hard_20260109_153022_000.json");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("round-robin"), "round-robin");
        assert_eq!(sanitize_filename("a/b\\c"), "a_b_c");
        assert_eq!(sanitize_filename("depth?"), "depth");
    }
}
