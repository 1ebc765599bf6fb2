//! Turn order over the shared min-heap, keyed by cumulative next-action time.
//! Dead actors are never removed eagerly: their stale entries are discarded when they surface.
//! It does not run turns; the game loop does that and reschedules the actor afterwards.

use crate::error::HeapError;
use crate::heap::MinHeap;
use crate::state::GameState;
use crate::types::ActorId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Player { priority: u32 },
    Monster { id: ActorId, priority: u32 },
    /// Only the player (or nobody) is left in the queue.
    GameOver,
}

#[derive(Default)]
pub struct TurnScheduler {
    queue: MinHeap<ActorId>,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self { queue: MinHeap::new() }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn schedule(&mut self, id: ActorId, priority: u32) {
        self.queue.insert(id, priority);
    }

    pub fn entries(&self) -> impl Iterator<Item = (ActorId, u32)> + '_ {
        self.queue.iter().map(|(&id, priority)| (id, priority))
    }

    /// Pops until a living actor surfaces, reaping dead monsters on the way.
    pub fn next_turn(&mut self, state: &mut GameState) -> Result<Turn, HeapError> {
        loop {
            let Some((&front, _)) = self.queue.peek_min() else {
                return Ok(Turn::GameOver);
            };
            if self.queue.len() == 1 && front == state.player_id {
                return Ok(Turn::GameOver);
            }

            let (id, priority) = self.queue.remove_min()?;
            let alive = state.actors.get(id).is_some_and(|actor| actor.alive);
            if !alive {
                if id != state.player_id {
                    state.remove_actor(id);
                }
                log::trace!("reaped dead actor {id:?} at priority {priority}");
                continue;
            }

            return Ok(if id == state.player_id {
                Turn::Player { priority }
            } else {
                Turn::Monster { id, priority }
            });
        }
    }

    /// Empties the queue and drops every actor except the player.
    pub fn reap_all(&mut self, state: &mut GameState) -> usize {
        self.queue.drain().for_each(drop);
        let doomed: Vec<ActorId> =
            state.actors.keys().filter(|&id| id != state.player_id).collect();
        for &id in &doomed {
            state.remove_actor(id);
        }
        doomed.len()
    }
}
