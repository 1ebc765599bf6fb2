//! Shared test fixtures for the simulation test suites.

use crate::dungeon::{Dungeon, Room};
use crate::mapgen::GeneratedLevel;
use crate::state::GameState;
use crate::types::*;

/// 12x9 sealed grid whose interior is one room spanning (1, 1) to (10, 7).
pub(crate) fn open_arena_dungeon() -> Dungeon {
    let mut dungeon = Dungeon::new(12, 9);
    for pos in dungeon.positions() {
        dungeon.set_stone(pos, 120);
    }
    dungeon.seal_border();
    dungeon.add_room(Room { x0: 1, y0: 1, x1: 10, y1: 7 });
    dungeon
}

pub(crate) fn open_arena_state(player: Pos) -> GameState {
    let level = GeneratedLevel { dungeon: open_arena_dungeon(), player_start: player };
    GameState::new(level, 10).expect("fixture cost fields")
}

/// Two rooms with no passage between them, split by stone at x = 5..=7.
pub(crate) fn walled_corridor_dungeon() -> Dungeon {
    let mut dungeon = Dungeon::new(14, 11);
    for pos in dungeon.positions() {
        dungeon.set_stone(pos, 100);
    }
    dungeon.seal_border();
    dungeon.add_room(Room { x0: 1, y0: 1, x1: 4, y1: 9 });
    dungeon.add_room(Room { x0: 8, y0: 1, x1: 12, y1: 9 });
    dungeon
}

/// The walled dungeon with the player at x = 2, y = 5 in the left room.
pub(crate) fn walled_corridor_state() -> GameState {
    let level =
        GeneratedLevel { dungeon: walled_corridor_dungeon(), player_start: Pos { y: 5, x: 2 } };
    GameState::new(level, 10).expect("fixture cost fields")
}

pub(crate) fn monster_at(
    state: &mut GameState,
    pos: Pos,
    traits: MonsterTraits,
    speed: u32,
) -> ActorId {
    state.spawn_actor(ActorKind::Monster(MonsterMind::new(traits)), pos, speed)
}
