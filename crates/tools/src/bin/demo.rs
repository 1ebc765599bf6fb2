use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use delver_core::render::render_dungeon;
use delver_core::{AdvanceStopReason, Game, GameConfig, LogEvent};
use delver_tools::checks::check_invariants;
use delver_tools::{logging, settings};

/// Automated play: the player wanders randomly until the game ends or the turn limit.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Player turns to play before stopping
    #[arg(short, long, default_value_t = 1000)]
    turns: u32,
    /// Pause between completed turns
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,
    /// Print the map after every player turn
    #[arg(long)]
    render: bool,
    #[arg(long)]
    nummon: Option<u32>,
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose).context("Failed to install logger")?;

    let mut config = match &args.config {
        Some(path) => settings::load_config(path)?,
        None => GameConfig::default(),
    };
    if args.nummon.is_some() {
        config.monster_count = args.nummon;
    }

    println!("Starting demo on seed {} for at most {} turns...", args.seed, args.turns);
    let mut game = Game::new(args.seed, config)?;
    check_invariants(&game)?;

    let mut played = 0;
    while played < args.turns {
        match game.advance(u32::MAX)?.stop_reason {
            AdvanceStopReason::Finished(outcome) => {
                println!("Finished with outcome {outcome:?} after {played} turns");
                break;
            }
            AdvanceStopReason::AwaitingPlayer { priority } => {
                let command = game.demo_command();
                log::debug!("turn {played} at priority {priority}: {command:?}");
                game.apply_command(command)?;
                played += 1;
            }
            AdvanceStopReason::BudgetExhausted => {}
        }

        check_invariants(&game)
            .with_context(|| format!("Invariant failed after turn {played}"))?;
        if args.render {
            let state = game.state();
            print!("{}", render_dungeon(&state.dungeon, &state.actors));
            println!();
        }
        if args.delay_ms > 0 {
            thread::sleep(Duration::from_millis(args.delay_ms));
        }
    }

    let kills =
        game.log().iter().filter(|event| matches!(event, LogEvent::ActorKilled { .. })).count();
    println!("Depth: {}", game.depth());
    println!("Kills: {kills}");
    println!("Monster turns: {}", game.monster_turns());
    println!("Snapshot Hash: {}", game.snapshot_hash());
    Ok(())
}
