//! Monster turn loop and terminal-state handling.

use super::monster_ai::{MoveResult, apply_monster_plan, plan_monster_turn};
use super::*;
use crate::error::SimError;
use crate::scheduler::Turn;

impl Game {
    /// Runs monster turns until the player must act, the game ends, or the budget is spent.
    pub fn advance(&mut self, max_monster_turns: u32) -> Result<AdvanceResult, SimError> {
        if let Some(outcome) = self.outcome {
            return Ok(AdvanceResult {
                monster_turns: 0,
                stop_reason: AdvanceStopReason::Finished(outcome),
            });
        }
        if let Some(priority) = self.pending_player {
            return Ok(AdvanceResult {
                monster_turns: 0,
                stop_reason: AdvanceStopReason::AwaitingPlayer { priority },
            });
        }

        let mut turns = 0;
        loop {
            if turns >= max_monster_turns {
                return Ok(AdvanceResult {
                    monster_turns: turns,
                    stop_reason: AdvanceStopReason::BudgetExhausted,
                });
            }

            match self.scheduler.next_turn(&mut self.state)? {
                Turn::GameOver => {
                    let outcome = if self.state.player().alive { Outcome::Win } else { Outcome::Lose };
                    self.finish(outcome);
                    return Ok(AdvanceResult {
                        monster_turns: turns,
                        stop_reason: AdvanceStopReason::Finished(outcome),
                    });
                }
                Turn::Player { priority } => {
                    self.pending_player = Some(priority);
                    return Ok(AdvanceResult {
                        monster_turns: turns,
                        stop_reason: AdvanceStopReason::AwaitingPlayer { priority },
                    });
                }
                Turn::Monster { id, priority } => {
                    let result = self.run_monster_turn(id)?;
                    let speed = self.state.actors.get(id).map_or(0, |actor| actor.speed);
                    self.scheduler.schedule(id, priority.saturating_add(speed));
                    self.monster_turns += 1;
                    turns += 1;

                    if let MoveResult::Killed { was_player: true, .. } = result {
                        self.finish(Outcome::Lose);
                        return Ok(AdvanceResult {
                            monster_turns: turns,
                            stop_reason: AdvanceStopReason::Finished(Outcome::Lose),
                        });
                    }
                }
            }
        }
    }

    fn run_monster_turn(&mut self, id: ActorId) -> Result<MoveResult, SimError> {
        let actor = self.state.actors.get(id).ok_or(SimError::UnknownActor)?;
        let Some(mind) = actor.mind().copied() else {
            return Err(SimError::UnknownActor);
        };
        let plan = plan_monster_turn(
            &self.state.dungeon,
            &self.state.cost_fields,
            actor.pos,
            &mind,
            self.state.player_pos(),
            &mut self.rng,
        );
        let result =
            apply_monster_plan(&mut self.state, id, &plan, self.config.dig_strength, &mut self.log);
        log::trace!("monster {id:?} {:?} -> {result:?}", mind.traits);
        Ok(result)
    }

    /// Records the outcome and reaps every remaining actor without running more turns.
    pub(super) fn finish(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
        self.pending_player = None;
        let reaped = self.scheduler.reap_all(&mut self.state);
        self.log.push(LogEvent::GameEnded { outcome });
        log::info!(
            "game ended: {outcome:?} at depth {} after {} monster turns ({reaped} actors reaped)",
            self.state.depth,
            self.monster_turns
        );
    }
}
