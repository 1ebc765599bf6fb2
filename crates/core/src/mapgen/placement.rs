//! Random cell selection inside rooms for staircases, the player, and monsters.

use crate::dungeon::{Dungeon, Room};
use crate::error::GenerationError;
use crate::rng::DungeonRng;
use crate::types::{CellKind, Pos};

/// A Room cell that is mutable, unoccupied, and not orthogonally next to a Hall.
pub fn is_open_room_cell(dungeon: &Dungeon, pos: Pos) -> bool {
    let Some(cell) = dungeon.cell(pos) else {
        return false;
    };
    cell.kind == CellKind::Room
        && !cell.immutable
        && cell.occupant.is_none()
        && !pos.neighbors4().iter().any(|&next| dungeon.kind_at(next) == CellKind::Hall)
}

pub fn random_location_in_room(dungeon: &Dungeon, room: &Room, rng: &mut DungeonRng) -> Option<Pos> {
    let width = room.width() as usize;
    let height = room.height() as usize;
    let x_offset = rng.below(width);
    let y_offset = rng.below(height);
    for ix in 0..width {
        for iy in 0..height {
            let pos = Pos {
                y: room.y0 + ((iy + y_offset) % height) as i32,
                x: room.x0 + ((ix + x_offset) % width) as i32,
            };
            if is_open_room_cell(dungeon, pos) {
                return Some(pos);
            }
        }
    }
    None
}

/// Tries every room once, starting from a random one.
pub fn random_location(dungeon: &Dungeon, rng: &mut DungeonRng) -> Option<Pos> {
    let rooms = dungeon.rooms();
    if rooms.is_empty() {
        return None;
    }
    let offset = rng.below(rooms.len());
    (0..rooms.len())
        .find_map(|i| random_location_in_room(dungeon, &rooms[(i + offset) % rooms.len()], rng))
}

pub(super) fn place_staircases(
    dungeon: &mut Dungeon,
    rng: &mut DungeonRng,
) -> Result<(), GenerationError> {
    for kind in [CellKind::UpStairs, CellKind::DownStairs] {
        let pos = random_location(dungeon, rng).ok_or(GenerationError::NoFreeCell)?;
        dungeon.carve(pos, kind);
    }
    Ok(())
}
