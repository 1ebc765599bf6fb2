use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct ActorId;
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { y: self.y + dy, x: self.x + dx }
    }

    pub fn squared_distance(self, other: Self) -> i64 {
        let dx = i64::from(self.x - other.x);
        let dy = i64::from(self.y - other.y);
        dx * dx + dy * dy
    }

    /// All eight surrounding positions, x-major then y, matching the order
    /// monsters scan their neighbourhood.
    pub fn neighbors8(self) -> [Pos; 8] {
        let mut out = [self; 8];
        let mut i = 0;
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                out[i] = self.offset(dx, dy);
                i += 1;
            }
        }
        out
    }

    pub fn neighbors4(self) -> [Pos; 4] {
        [self.offset(0, -1), self.offset(-1, 0), self.offset(1, 0), self.offset(0, 1)]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellKind {
    #[default]
    Empty,
    Stone,
    Room,
    Hall,
    UpStairs,
    DownStairs,
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MonsterTraits: u8 {
        const INTELLIGENT = 0x01;
        const TELEPATHIC = 0x02;
        const TUNNELING = 0x04;
        const ERRATIC = 0x08;
    }
}

/// Per-monster memory carried between turns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MonsterMind {
    pub traits: MonsterTraits,
    pub last_seen_player: Option<Pos>,
}

impl MonsterMind {
    pub fn new(traits: MonsterTraits) -> Self {
        Self { traits, last_seen_player: None }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActorKind {
    Player,
    Monster(MonsterMind),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::NorthEast => (1, -1),
            Self::East => (1, 0),
            Self::SouthEast => (1, 1),
            Self::South => (0, 1),
            Self::SouthWest => (-1, 1),
            Self::West => (-1, 0),
            Self::NorthWest => (-1, -1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerCommand {
    Move(Direction),
    Rest,
    Descend,
    Ascend,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Lose,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceStopReason {
    AwaitingPlayer { priority: u32 },
    Finished(Outcome),
    BudgetExhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdvanceResult {
    pub monster_turns: u32,
    pub stop_reason: AdvanceStopReason,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    LevelEntered { depth: i32, monsters: usize },
    ActorKilled { killer: ActorId, victim: ActorId, at: Pos },
    TunnelDug { by: ActorId, at: Pos, remaining: u8 },
    GameEnded { outcome: Outcome },
}
