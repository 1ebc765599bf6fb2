//! Greedy room connection and winding corridor carving.

use crate::dungeon::{Dungeon, Room};
use crate::error::GenerationError;
use crate::rng::DungeonRng;
use crate::types::{CellKind, Pos};

/// Joins each unconnected room to the closest already-connected room, in room order.
pub(super) fn connect_rooms(
    dungeon: &mut Dungeon,
    rng: &mut DungeonRng,
) -> Result<(), GenerationError> {
    let rooms = dungeon.rooms().to_vec();
    if rooms.len() < 2 {
        return Ok(());
    }

    let mut connected = vec![false; rooms.len()];
    connected[0] = true;
    while let Some(next) = connected.iter().position(|done| !done) {
        connected[next] = true;
        let center = rooms[next].center();
        let Some(nearest) = (0..rooms.len())
            .filter(|&other| other != next && connected[other])
            .min_by_key(|&other| rooms[other].center().squared_distance(center))
        else {
            continue;
        };

        let from = random_point_in(&rooms[next], rng);
        let to = random_point_in(&rooms[nearest], rng);
        connect_points(dungeon, from, to, rng)?;
    }
    Ok(())
}

fn random_point_in(room: &Room, rng: &mut DungeonRng) -> Pos {
    Pos {
        y: room.y0 + rng.below(room.height() as usize) as i32,
        x: room.x0 + rng.below(room.width() as usize) as i32,
    }
}

/// Walks from `from` to `to` one axis step at a time, turning Stone into Hall.
pub(super) fn connect_points(
    dungeon: &mut Dungeon,
    from: Pos,
    to: Pos,
    rng: &mut DungeonRng,
) -> Result<(), GenerationError> {
    let dx = (to.x - from.x).signum();
    let dy = (to.y - from.y).signum();
    let mut current = from;
    while current != to {
        let step_x = current.offset(dx, 0);
        let step_y = current.offset(0, dy);
        let can_x = current.x != to.x && !dungeon.is_immutable(step_x);
        let can_y = current.y != to.y && !dungeon.is_immutable(step_y);
        let prefer_x = rng.coin_flip();

        current = match (can_x, can_y) {
            (true, true) if prefer_x => step_x,
            (true, true) => step_y,
            (true, false) => step_x,
            (false, true) => step_y,
            (false, false) => {
                return Err(GenerationError::CorridorBlocked { from, to, at: current });
            }
        };
        if dungeon.is_stone(current) {
            dungeon.carve(current, CellKind::Hall);
        }
    }
    Ok(())
}
