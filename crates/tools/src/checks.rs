//! Whole-state consistency checks run by the automated player between turns.

use anyhow::{Result, ensure};
use delver_core::Game;

/// Living actors stand on open cells and occupant slots point back at them.
pub fn check_invariants(game: &Game) -> Result<()> {
    let state = game.state();
    for actor in state.actors.values().filter(|actor| actor.alive) {
        ensure!(
            state.dungeon.is_passable(actor.pos),
            "actor {:?} is inside stone at {:?}",
            actor.id,
            actor.pos
        );
        ensure!(
            state.dungeon.occupant_at(actor.pos) == Some(actor.id),
            "cell {:?} does not point back at actor {:?}",
            actor.pos,
            actor.id
        );
    }
    for pos in state.dungeon.positions() {
        if let Some(id) = state.dungeon.occupant_at(pos) {
            let actor_pos = state.actors.get(id).map(|actor| actor.pos);
            ensure!(actor_pos == Some(pos), "stale occupant {id:?} at {pos:?}");
        }
    }
    Ok(())
}
