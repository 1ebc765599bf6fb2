//! Deterministic simulation facade: level setup, the turn loop, and player commands.

mod advance;
mod bootstrap;
mod hash;
pub mod monster_ai;
mod player;
pub mod sight;
#[cfg(test)]
pub(crate) mod test_support;

use crate::config::GameConfig;
use crate::rng::DungeonRng;
use crate::scheduler::TurnScheduler;
use crate::state::GameState;
use crate::types::*;

pub struct Game {
    seed: u64,
    config: GameConfig,
    rng: DungeonRng,
    state: GameState,
    scheduler: TurnScheduler,
    log: Vec<LogEvent>,
    /// Priority the player was popped at, while waiting for a command.
    pending_player: Option<u32>,
    outcome: Option<Outcome>,
    monster_turns: u64,
    player_turns: u64,
}

impl Game {
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_awaiting_player(&self) -> bool {
        self.pending_player.is_some()
    }

    pub fn depth(&self) -> i32 {
        self.state.depth
    }

    pub fn monster_turns(&self) -> u64 {
        self.monster_turns
    }

    pub fn player_turns(&self) -> u64 {
        self.player_turns
    }

    /// Queue entries in storage order, dead ones included.
    pub fn scheduled(&self) -> impl Iterator<Item = (ActorId, u32)> + '_ {
        self.scheduler.entries()
    }
}
