use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use delver_core::render::{render_cost_field, render_dungeon, write_hardness_pgm};
use delver_core::{Game, GameConfig, load_dungeon_from_file, save_dungeon_to_file};
use delver_tools::{logging, settings};

/// Generate or load a dungeon level, populate it, and print it.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for generation and monsters; defaults to the current time
    #[arg(short, long)]
    seed: Option<u64>,
    /// TOML (or .json) game configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Load the level from a dungeon file instead of generating one
    #[arg(long)]
    load: Option<PathBuf>,
    /// Write the level to a dungeon file
    #[arg(long)]
    save: Option<PathBuf>,
    /// Fixed number of monsters
    #[arg(long)]
    nummon: Option<u32>,
    /// Print the walking and tunneling cost fields
    #[arg(long)]
    costs: bool,
    /// Dump the hardness matrix as a binary PGM image
    #[arg(long)]
    pgm: Option<PathBuf>,
    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn time_seed() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |elapsed| elapsed.as_secs())
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose).context("Failed to install logger")?;

    let mut config = match &args.config {
        Some(path) => settings::load_config(path)?,
        None => GameConfig::default(),
    };
    if let Some(count) = args.nummon {
        config.monster_count = Some(count);
    }
    if args.print_config {
        print!("{}", settings::render_config(&config)?);
        return Ok(());
    }

    let seed = args.seed.unwrap_or_else(time_seed);
    log::info!("using seed {seed}");
    let game = match &args.load {
        Some(path) => {
            let saved = load_dungeon_from_file(path)
                .with_context(|| format!("Failed to load dungeon file: {}", path.display()))?;
            Game::from_saved(seed, config, saved)?
        }
        None => Game::new(seed, config)?,
    };
    let state = game.state();

    println!("Seed: {seed}");
    print!("{}", render_dungeon(&state.dungeon, &state.actors));
    if args.costs {
        println!("Walking distances:");
        print!("{}", render_cost_field(&state.cost_fields.walking));
        println!("Tunneling distances:");
        print!("{}", render_cost_field(&state.cost_fields.tunneling));
    }

    if let Some(path) = &args.pgm {
        let file = File::create(path)
            .with_context(|| format!("Failed to create PGM file: {}", path.display()))?;
        write_hardness_pgm(&mut BufWriter::new(file), &state.dungeon)?;
    }
    if let Some(path) = &args.save {
        save_dungeon_to_file(path, &state.dungeon, state.player_pos())
            .with_context(|| format!("Failed to save dungeon file: {}", path.display()))?;
        log::info!("saved dungeon to {}", path.display());
    }
    println!("Snapshot Hash: {}", game.snapshot_hash());

    Ok(())
}
