pub mod config;
pub mod dungeon;
pub mod dungeon_file;
pub mod error;
pub mod game;
pub mod heap;
pub mod mapgen;
pub mod pathfinding;
pub mod render;
pub mod rng;
pub mod scheduler;
pub mod state;
pub mod types;

pub use config::{GameConfig, GenerationConfig};
pub use dungeon::{Cell, DigOutcome, Dungeon, Room};
pub use dungeon_file::{SavedDungeon, load_dungeon_from_file, save_dungeon_to_file};
pub use error::*;
pub use game::Game;
pub use heap::MinHeap;
pub use mapgen::{GeneratedLevel, MapGenerator, generate_level};
pub use pathfinding::{CostField, CostFields, Traversal, UNREACHABLE};
pub use rng::DungeonRng;
pub use state::{Actor, GameState};
pub use types::*;
