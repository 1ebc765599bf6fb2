//! Error taxonomy shared by generation, scheduling, persistence, and commands.

use std::io;

use thiserror::Error;

use crate::types::Pos;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeapError {
    #[error("attempted to remove top of heap while empty")]
    Empty,
    #[error("item is not in heap")]
    ItemNotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("dungeon of {width}x{height} is too small to generate")]
    InvalidDimensions { width: usize, height: usize },
    #[error("placed {placed} rooms but at least {required} are required")]
    MinimumRooms { placed: usize, required: usize },
    #[error("corridor from {from:?} to {to:?} is blocked at {at:?}")]
    CorridorBlocked { from: Pos, to: Pos, at: Pos },
    #[error("no free room cell is available")]
    NoFreeCell,
    #[error("gave up generating a dungeon after {attempts} attempts")]
    AttemptsExhausted { attempts: u32 },
}

/// A configuration whose ranges cannot be drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{field} range {min}..={max} is empty")]
    EmptyRange { field: &'static str, min: u32, max: u32 },
    #[error("{field} must be at least 1")]
    ZeroSpeed { field: &'static str },
}

#[derive(Debug, Error)]
pub enum DungeonFileError {
    #[error("dungeon file I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("dungeon file header does not match")]
    BadHeader,
    #[error("unsupported dungeon file version {found}")]
    UnsupportedVersion { found: u32 },
    #[error("dungeon file ended while reading {field}")]
    Truncated { field: &'static str },
    #[error("dungeon is {width}x{height}, files only hold {expected_width}x{expected_height}")]
    DimensionMismatch { width: usize, height: usize, expected_width: usize, expected_height: usize },
    #[error("{field} at ({x}, {y}) lies outside the dungeon")]
    OutOfBounds { field: &'static str, x: i32, y: i32 },
    #[error("too many {field} to encode")]
    Overflow { field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("invalid game config: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("turn queue invariant violated: {0}")]
    Heap(#[from] HeapError),
    #[error("actor scheduled but missing from the arena")]
    UnknownActor,
}

/// A player command that was refused. The player keeps the turn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("the game is already over")]
    Finished,
    #[error("it is not the player's turn")]
    NotPlayersTurn,
    #[error("there's stone in the way at {0:?}")]
    Blocked(Pos),
    #[error("there is no matching staircase here")]
    NoStaircase,
    #[error(transparent)]
    Sim(#[from] SimError),
}
