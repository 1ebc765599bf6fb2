use delver_core::{
    AdvanceStopReason, DungeonRng, Game, GameConfig, GenerationConfig, MapGenerator, PlayerCommand,
};

/// Plays `player_turns` demo commands and returns the hash after each one.
fn demo_trace(seed: u64, player_turns: usize) -> Vec<u64> {
    let mut game = Game::new(seed, GameConfig::default()).expect("default config generates");
    let mut trace = vec![game.snapshot_hash()];
    for _ in 0..player_turns {
        match game.advance(10_000).expect("advance").stop_reason {
            AdvanceStopReason::AwaitingPlayer { .. } => {
                let command = game.demo_command();
                game.apply_command(command).expect("demo commands are always legal");
            }
            AdvanceStopReason::Finished(_) => break,
            AdvanceStopReason::BudgetExhausted => {}
        }
        trace.push(game.snapshot_hash());
    }
    trace
}

#[test]
fn test_determinism_identical_seeds_produce_same_hash() {
    assert_eq!(demo_trace(12345, 25), demo_trace(12345, 25));
}

#[test]
fn test_determinism_different_seeds_produce_different_hashes() {
    assert_ne!(demo_trace(123, 5).last(), demo_trace(456, 5).last());
}

#[test]
fn generator_output_depends_only_on_the_seed() {
    let generator = MapGenerator::new(GenerationConfig::default());
    for seed in [1, 99, 4242] {
        let first = generator.generate(&mut DungeonRng::from_seed(seed));
        let second = generator.generate(&mut DungeonRng::from_seed(seed));
        assert_eq!(first, second, "seed {seed}");
    }
}

#[test]
fn rest_only_player_sees_the_same_monster_turn_count() {
    let run = |seed| {
        let mut game = Game::new(seed, GameConfig::default()).expect("generates");
        let mut monster_turns = Vec::new();
        for _ in 0..10 {
            let result = game.advance(10_000).expect("advance");
            monster_turns.push(result.monster_turns);
            if !matches!(result.stop_reason, AdvanceStopReason::AwaitingPlayer { .. }) {
                break;
            }
            game.apply_command(PlayerCommand::Rest).expect("rest");
        }
        monster_turns
    };
    assert_eq!(run(77), run(77));
}
