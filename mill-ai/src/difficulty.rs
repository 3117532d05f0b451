//! 难度分级 AI
//!
//! 每个难度固定搜索深度、随机走子概率和评估权重。走子时先按概率决定是否随机走一步，
//! 否则交给搜索引擎。

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use protocol::{GameModel, Move, Player};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AiError;
use crate::evaluate::{Evaluator, FeatureWeights, Utility};
use crate::search::{AiEngine, SearchStats};

/// AI 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 简单：depth=2, 30% 随机走子
    Easy,
    /// 中等：depth=4, 15% 随机走子
    Medium,
    /// 困难：depth=6, 不随机
    Hard,
}

impl Difficulty {
    /// 所有难度，由易到难
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// 默认搜索深度
    pub fn max_depth(&self) -> u8 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
        }
    }

    /// 随机走子概率
    pub fn random_prob(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.30,
            Difficulty::Medium => 0.15,
            Difficulty::Hard => 0.0,
        }
    }

    /// 评估权重
    pub fn weights(&self) -> FeatureWeights {
        match self {
            Difficulty::Easy => FeatureWeights::new(5.0, 30.0, 1.0, 2.0, 5.0),
            Difficulty::Medium => FeatureWeights::new(8.0, 40.0, 1.5, 3.0, 8.0),
            Difficulty::Hard => FeatureWeights::new(10.0, 50.0, 2.0, 5.0, 10.0),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = AiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(AiError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// AI 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    pub max_depth: u8,
    pub random_prob: f64,
    pub weights: FeatureWeights,
    pub use_alpha_beta: bool,
}

impl AiConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            max_depth: difficulty.max_depth(),
            random_prob: difficulty.random_prob(),
            weights: difficulty.weights(),
            use_alpha_beta: true,
        }
    }

    /// 覆盖搜索深度（None 保留难度默认值）
    pub fn with_depth(mut self, depth: Option<u8>) -> Self {
        if let Some(depth) = depth {
            self.max_depth = depth;
        }
        self
    }

    pub fn with_weights(mut self, weights: FeatureWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_random_prob(mut self, random_prob: f64) -> Self {
        self.random_prob = random_prob;
        self
    }

    pub fn with_alpha_beta(mut self, enabled: bool) -> Self {
        self.use_alpha_beta = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), AiError> {
        if !(0.0..=1.0).contains(&self.random_prob) {
            return Err(AiError::InvalidProbability(self.random_prob));
        }
        self.weights.validate()
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Hard)
    }
}

/// 最近一次搜索的诊断信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiStatistics {
    pub difficulty: Difficulty,
    pub max_depth: u8,
    pub random_prob: f64,
    pub nodes_evaluated: u64,
    pub pruning_count: u64,
    pub pruning_ratio: f64,
}

impl AiStatistics {
    fn new(config: &AiConfig, stats: &SearchStats) -> Self {
        Self {
            difficulty: config.difficulty,
            max_depth: config.max_depth,
            random_prob: config.random_prob,
            nodes_evaluated: stats.nodes_evaluated,
            pruning_count: stats.pruning_count,
            pruning_ratio: stats.pruning_ratio(),
        }
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// 九子棋 AI
pub struct MillAi<M: GameModel> {
    config: AiConfig,
    engine: AiEngine<M>,
    rng: ChaCha8Rng,
}

impl<M: GameModel> MillAi<M> {
    /// 按难度创建
    pub fn new(difficulty: Difficulty) -> Self {
        let config = AiConfig::from_difficulty(difficulty);
        let utility = Arc::new(Evaluator::new(config.weights));
        Self::build(config, utility)
    }

    /// 从自定义配置创建
    pub fn from_config(config: AiConfig) -> Result<Self, AiError> {
        config.validate()?;
        let utility = Arc::new(Evaluator::new(config.weights));
        Ok(Self::build(config, utility))
    }

    /// 使用自定义评估函数（配置中的权重不再生效）
    pub fn with_utility(config: AiConfig, utility: Arc<dyn Utility<M>>) -> Result<Self, AiError> {
        config.validate()?;
        Ok(Self::build(config, utility))
    }

    fn build(config: AiConfig, utility: Arc<dyn Utility<M>>) -> Self {
        let engine = AiEngine::new(utility, config.max_depth).with_alpha_beta(config.use_alpha_beta);
        Self {
            config,
            engine,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// 固定随机种子，便于复现
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    pub fn max_depth(&self) -> u8 {
        self.config.max_depth
    }

    pub fn engine(&self) -> &AiEngine<M> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut AiEngine<M> {
        &mut self.engine
    }

    /// 覆盖搜索深度
    pub fn set_max_depth(&mut self, depth: u8) {
        self.config.max_depth = depth;
        self.engine.set_max_depth(depth);
    }

    /// 选择走法，无合法走法时返回 None
    pub fn choose_move(&mut self, model: &M, player: Player) -> Option<Move> {
        let moves = model.legal_moves(player);
        if moves.is_empty() {
            return None;
        }

        if self.rng.gen::<f64>() < self.config.random_prob {
            let mv = moves.choose(&mut self.rng).copied();
            debug!("{} AI played a random move: {:?}", self.config.difficulty, mv);
            return mv;
        }

        self.engine.best_move(model, player).best_move
    }

    /// 最近一次搜索的统计
    pub fn statistics(&self) -> AiStatistics {
        AiStatistics::new(&self.config, self.engine.stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::{MillModel, Notation};

    #[test]
    fn test_difficulty_config() {
        let easy = AiConfig::from_difficulty(Difficulty::Easy);
        assert_eq!(easy.max_depth, 2);
        assert_eq!(easy.random_prob, 0.3);
        assert_eq!(easy.weights.mill, 30.0);

        let medium = AiConfig::from_difficulty(Difficulty::Medium);
        assert_eq!(medium.max_depth, 4);
        assert_eq!(medium.weights.mobility, 1.5);

        let hard = AiConfig::from_difficulty(Difficulty::Hard);
        assert_eq!(hard.max_depth, 6);
        assert_eq!(hard.random_prob, 0.0);
        assert_eq!(hard.weights, FeatureWeights::default());
    }

    #[test]
    fn test_difficulty_ordering() {
        for pair in Difficulty::ALL.windows(2) {
            let (lower, higher) = (pair[0], pair[1]);
            assert!(lower.max_depth() <= higher.max_depth());
            assert!(lower.random_prob() >= higher.random_prob());
        }
    }

    #[test]
    fn test_depth_override() {
        let config = AiConfig::from_difficulty(Difficulty::Hard).with_depth(Some(3));
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.random_prob, 0.0);

        let config = AiConfig::from_difficulty(Difficulty::Easy).with_depth(None);
        assert_eq!(config.max_depth, 2);

        let ai: MillAi<MillModel> = MillAi::from_config(config.with_depth(Some(5))).unwrap();
        assert_eq!(ai.max_depth(), 5);
        assert_eq!(ai.engine().max_depth(), 5);
    }

    #[test]
    fn test_parse_difficulty() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!(" Hard ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(
            "expert".parse::<Difficulty>(),
            Err(AiError::UnknownDifficulty("expert".to_string()))
        );
        assert_eq!(Difficulty::Medium.to_string(), "medium");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AiConfig::default().with_random_prob(1.5);
        assert_eq!(
            MillAi::<MillModel>::from_config(config).err(),
            Some(AiError::InvalidProbability(1.5))
        );
    }

    #[test]
    fn test_no_moves_returns_none() {
        let model = Notation::parse("121......2....2.....2121 0 0").unwrap();
        let mut ai = MillAi::new(Difficulty::Easy).with_seed(7);
        assert_eq!(ai.choose_move(&model, Player::One), None);
    }

    #[test]
    fn test_always_random_skips_search() {
        let config = AiConfig::from_difficulty(Difficulty::Easy).with_random_prob(1.0);
        let mut ai: MillAi<MillModel> = MillAi::from_config(config).unwrap().with_seed(1);
        let model = MillModel::new();

        let mv = ai.choose_move(&model, Player::One).unwrap();
        assert!(model.legal_moves(Player::One).contains(&mv));
        assert_eq!(ai.statistics().nodes_evaluated, 0);
    }

    #[test]
    fn test_statistics_annotated() {
        let mut ai: MillAi<MillModel> = MillAi::new(Difficulty::Hard);
        ai.set_max_depth(2);
        ai.choose_move(&MillModel::new(), Player::One);

        let stats = ai.statistics();
        assert_eq!(stats.difficulty, Difficulty::Hard);
        assert_eq!(stats.max_depth, 2);
        assert!(stats.nodes_evaluated >= 24);
        assert!(stats.pruning_count <= stats.nodes_evaluated);

        let json = stats.to_json().unwrap();
        assert!(json.contains("\"difficulty\":\"hard\""));
    }
}
