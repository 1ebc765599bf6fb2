//! Player command handling and the automated wander policy.

use super::*;
use crate::error::{CommandError, SimError};
use crate::mapgen::generate_level;

impl Game {
    /// Applies one command for the waiting player. Refused commands leave the turn pending.
    pub fn apply_command(&mut self, command: PlayerCommand) -> Result<(), CommandError> {
        if self.outcome.is_some() {
            return Err(CommandError::Finished);
        }
        let Some(priority) = self.pending_player else {
            return Err(CommandError::NotPlayersTurn);
        };

        match command {
            PlayerCommand::Quit => {
                self.finish(Outcome::Quit);
                return Ok(());
            }
            PlayerCommand::Descend => return self.take_stairs(CellKind::DownStairs, 1),
            PlayerCommand::Ascend => return self.take_stairs(CellKind::UpStairs, -1),
            PlayerCommand::Move(direction) => self.move_player(direction)?,
            PlayerCommand::Rest => {}
        }

        let speed = self.state.player().speed;
        self.pending_player = None;
        self.scheduler.schedule(self.state.player_id, priority.saturating_add(speed));
        self.player_turns += 1;
        Ok(())
    }

    fn move_player(&mut self, direction: Direction) -> Result<(), CommandError> {
        let player_id = self.state.player_id;
        let (dx, dy) = direction.delta();
        let to = self.state.player_pos().offset(dx, dy);
        if !self.state.dungeon.is_passable(to) {
            return Err(CommandError::Blocked(to));
        }

        if let Some(victim) = self.state.dungeon.occupant_at(to).filter(|&id| id != player_id) {
            self.state.kill_actor(victim);
            self.log.push(LogEvent::ActorKilled { killer: player_id, victim, at: to });
        }
        self.state.move_actor(player_id, to);
        self.state.refresh_cost_fields().map_err(SimError::from)?;
        Ok(())
    }

    fn take_stairs(&mut self, staircase: CellKind, depth_change: i32) -> Result<(), CommandError> {
        if self.state.dungeon.kind_at(self.state.player_pos()) != staircase {
            return Err(CommandError::NoStaircase);
        }
        let level = generate_level(&self.config.generation, &mut self.rng).map_err(SimError::from)?;

        self.scheduler.reap_all(&mut self.state);
        self.state.install_level(level).map_err(SimError::from)?;
        self.state.depth += depth_change;
        self.pending_player = None;
        self.player_turns += 1;
        self.populate_level()?;
        Ok(())
    }

    /// A uniformly random passable neighbour, or rest when boxed in.
    pub fn demo_command(&mut self) -> PlayerCommand {
        let pos = self.state.player_pos();
        let open: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|direction| {
                let (dx, dy) = direction.delta();
                self.state.dungeon.is_passable(pos.offset(dx, dy))
            })
            .collect();
        if open.is_empty() {
            return PlayerCommand::Rest;
        }
        PlayerCommand::Move(open[self.rng.below(open.len())])
    }
}
