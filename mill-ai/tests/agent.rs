//! 难度分级 AI 的整体行为

use mill_ai::{AiConfig, Difficulty, MillAi};
use protocol::{GameModel, MillGame, MillModel, Notation, Player};

#[test]
fn difficulty_tiers_are_monotonic() {
    let configs: Vec<AiConfig> = Difficulty::ALL
        .iter()
        .map(|&d| AiConfig::from_difficulty(d))
        .collect();

    for pair in configs.windows(2) {
        assert!(pair[0].max_depth <= pair[1].max_depth);
        assert!(pair[0].random_prob >= pair[1].random_prob);
    }
}

#[test]
fn random_move_rate_follows_probability() {
    const TRIALS: usize = 4000;
    let probability = 0.3;

    let config = AiConfig::from_difficulty(Difficulty::Easy)
        .with_depth(Some(1))
        .with_random_prob(probability);
    let mut ai: MillAi<MillModel> = MillAi::from_config(config).unwrap().with_seed(42);
    let model = MillModel::new();

    // 一层搜索时所有落点同分，搜索总是选择第一个走法
    let searched = model.legal_moves(Player::One)[0];
    let options = model.legal_moves(Player::One).len() as f64;

    let differing = (0..TRIALS)
        .filter(|_| ai.choose_move(&model, Player::One) != Some(searched))
        .count();

    let observed = differing as f64 / TRIALS as f64;
    let expected = probability * (options - 1.0) / options;
    assert!(
        (observed - expected).abs() < 0.04,
        "observed {observed}, expected {expected}"
    );
}

#[test]
fn deterministic_without_randomness() {
    let model = Notation::parse("1.2.1.2..12.1..2..1.2... 5 5").unwrap();
    let config = AiConfig::from_difficulty(Difficulty::Hard).with_depth(Some(3));

    let mut first: MillAi<MillModel> = MillAi::from_config(config.clone()).unwrap().with_seed(1);
    let mut second: MillAi<MillModel> = MillAi::from_config(config).unwrap().with_seed(99);

    let expected = first.choose_move(&model, Player::One);
    assert!(expected.is_some());
    for _ in 0..3 {
        assert_eq!(first.choose_move(&model, Player::One), expected);
        assert_eq!(second.choose_move(&model, Player::One), expected);
    }
}

#[test]
fn choosing_does_not_mutate_position() {
    let model = Notation::parse("11.22.1.2.1.2..1.2..12.. 0 0").unwrap();
    let before = Notation::to_string(&model);

    let mut ai: MillAi<MillModel> = MillAi::new(Difficulty::Medium).with_seed(5);
    ai.set_max_depth(2);
    for _ in 0..5 {
        ai.choose_move(&model, Player::Two);
    }

    assert_eq!(Notation::to_string(&model), before);
}

fn play_placement_phase(depth: u8) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mut game = MillGame::new();
    let mut ais: Vec<MillAi<MillModel>> = (0..2)
        .map(|seed| {
            let config = AiConfig::from_difficulty(Difficulty::Hard).with_depth(Some(depth));
            MillAi::from_config(config).unwrap().with_seed(seed)
        })
        .collect();

    for _ in 0..18 {
        if game.result().is_some() {
            break;
        }
        let player = game.current_player();
        let legal = game.legal_moves();
        let ai = &mut ais[player.index()];

        let mv = ai
            .choose_move(game.model(), player)
            .expect("placing side always has a move");
        assert!(legal.contains(&mv), "illegal move {mv}");

        let stats = ai.statistics();
        assert!(stats.nodes_evaluated >= legal.len() as u64);
        assert!(stats.pruning_count <= stats.nodes_evaluated);

        game.play(mv).unwrap();
    }
}

#[test]
fn hard_plays_legal_placements_at_reduced_depth() {
    play_placement_phase(2);
}

/// 未优化构建下较慢，只在 `cargo test --release` 中运行
#[test]
#[cfg_attr(debug_assertions, ignore)]
fn hard_plays_legal_placements_at_full_depth() {
    play_placement_phase(Difficulty::Hard.max_depth());
}
