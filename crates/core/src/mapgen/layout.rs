//! Room placement over the smoothed stone field.

use crate::config::GenerationConfig;
use crate::dungeon::{Dungeon, Room};
use crate::error::GenerationError;
use crate::rng::DungeonRng;
use crate::types::{CellKind, Pos};

/// Places `min_rooms` plus a random number of optional rooms.
///
/// Only a failure among the first `min_rooms` placements is an error.
pub(super) fn place_rooms(
    dungeon: &mut Dungeon,
    config: &GenerationConfig,
    rng: &mut DungeonRng,
) -> Result<(), GenerationError> {
    let target = config.min_rooms + rng.below(config.extra_room_randomness);
    for room_index in 0..target {
        let width = config.room_min_width + rng.below(config.room_size_randomness);
        let height = config.room_min_height + rng.below(config.room_size_randomness);
        match find_room_slot(dungeon, width, height, rng) {
            Some(room) => dungeon.add_room(room),
            None if room_index < config.min_rooms => {
                return Err(GenerationError::MinimumRooms {
                    placed: dungeon.rooms().len(),
                    required: config.min_rooms,
                });
            }
            None => log::trace!("optional room {room_index} ({width}x{height}) did not fit"),
        }
    }
    Ok(())
}

/// Scans every anchor in wraparound order from a random offset.
fn find_room_slot(
    dungeon: &Dungeon,
    width: usize,
    height: usize,
    rng: &mut DungeonRng,
) -> Option<Room> {
    let (grid_width, grid_height) = (dungeon.width(), dungeon.height());
    let x_offset = rng.below(grid_width);
    let y_offset = rng.below(grid_height);
    for ix in 0..grid_width {
        for iy in 0..grid_height {
            let x = (ix + x_offset) % grid_width;
            let y = (iy + y_offset) % grid_height;
            let candidate = Room::from_size(x as i32, y as i32, width as i32, height as i32);
            if room_fits(dungeon, &candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// The footprint plus a one-cell ring must be mutable interior Stone.
pub(super) fn room_fits(dungeon: &Dungeon, room: &Room) -> bool {
    ((room.y0 - 1)..=(room.y1 + 1)).all(|y| {
        ((room.x0 - 1)..=(room.x1 + 1)).all(|x| {
            let pos = Pos { y, x };
            dungeon.cell(pos).is_some_and(|cell| {
                cell.kind == CellKind::Stone && !cell.immutable && !dungeon.is_border(pos)
            })
        })
    })
}
