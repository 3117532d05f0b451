//! mill-arena: 九子棋 AI 对战命令行
//!
//! - `mill-arena match easy hard` - 两个难度对战
//! - `mill-arena tournament` - 循环赛
//! - `mill-arena self-play` - 困难对困难自对弈
//! - `mill-arena depth` - 搜索深度性能分析

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mill_ai::Difficulty;
use mill_arena::{
    analyze_depth_performance, analyze_self_play, ArenaConfig, ReportStore, Tournament,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 九子棋 AI 对战与分析工具
#[derive(Parser)]
#[command(name = "mill-arena")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON 配置文件
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 随机种子（覆盖配置文件）
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// 搜索深度（覆盖所有难度）
    #[arg(long, global = true)]
    depth: Option<u8>,

    /// 将报告保存到输出目录
    #[arg(long, global = true)]
    save: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 两个难度之间的比赛，ai1 执先
    Match {
        ai1: Difficulty,
        ai2: Difficulty,
        /// 对局数
        #[arg(short, long)]
        games: Option<u32>,
    },
    /// 循环赛（默认全部难度）
    Tournament {
        #[arg(value_delimiter = ',')]
        difficulties: Vec<Difficulty>,
        /// 每场对局数
        #[arg(short, long)]
        games: Option<u32>,
    },
    /// 困难对困难自对弈
    SelfPlay {
        #[arg(short, long, default_value_t = 20)]
        games: u32,
    },
    /// 各搜索深度的耗时与节点数
    Depth {
        #[arg(long)]
        max_depth: Option<u8>,
        #[arg(long)]
        runs: Option<u32>,
    },
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mill_arena=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let mut config = ArenaConfig::load_or_default(cli.config.as_deref())?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.depth.is_some() {
        config.depth = cli.depth;
    }
    info!("Arena config: {:?}", config);

    let store = if cli.save {
        Some(ReportStore::new(&config.output_dir)?)
    } else {
        None
    };

    match cli.command {
        Commands::Match { ai1, ai2, games } => {
            let games = games.unwrap_or(config.games_per_match);
            let mut tournament = Tournament::new(config);
            tournament.run_match(ai1, ai2, games)?;
            println!("{}", tournament.summary());

            if let Some(store) = &store {
                store.save(&format!("match_{}_vs_{}", ai1, ai2), tournament.history())?;
                for (i, record) in tournament.records().iter().enumerate() {
                    store.save(&format!("game_{}_{}_vs_{}", i + 1, ai1, ai2), record)?;
                }
            }
        }
        Commands::Tournament {
            difficulties,
            games,
        } => {
            let difficulties = if difficulties.is_empty() {
                Difficulty::ALL.to_vec()
            } else {
                difficulties
            };
            if let Some(games) = games {
                config.games_per_match = games;
            }

            let mut tournament = Tournament::new(config);
            tournament.run_round_robin(&difficulties)?;
            println!("{}", tournament.summary());

            if let Some(store) = &store {
                store.save("tournament", tournament.history())?;
            }
        }
        Commands::SelfPlay { games } => {
            let report = analyze_self_play(&config, games)?;
            println!("=== Self-Play (hard vs hard) ===");
            println!("Games: {}", report.total_games);
            println!("Draws: {}", report.draws);
            println!("Draw rate: {:.1}%", report.draw_rate * 100.0);
            println!("Avg game time: {:.2}s", report.avg_game_time_ms / 1000.0);

            if let Some(store) = &store {
                store.save("self_play", &report)?;
            }
        }
        Commands::Depth { max_depth, runs } => {
            let max_depth = max_depth.unwrap_or(config.depth_analysis_max_depth);
            let runs = runs.unwrap_or(config.depth_analysis_runs);
            let report = analyze_depth_performance(max_depth, runs)?;

            println!("=== Depth Analysis ({} runs per depth) ===", report.runs);
            for sample in &report.samples {
                println!(
                    "Depth {}: {:.2} ms, {:.0} nodes, pruning {:.1}%",
                    sample.depth,
                    sample.avg_time_ms,
                    sample.avg_nodes,
                    sample.avg_pruning_ratio * 100.0
                );
            }

            if let Some(store) = &store {
                store.save("depth_analysis", &report)?;
            }
        }
    }

    Ok(())
}
