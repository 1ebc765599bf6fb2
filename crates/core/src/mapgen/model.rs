//! Public data model for a freshly generated level.

use crate::dungeon::Dungeon;
use crate::types::{CellKind, Pos};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedLevel {
    pub dungeon: Dungeon,
    pub player_start: Pos,
}

impl GeneratedLevel {
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.dungeon.width() as u32).to_le_bytes());
        bytes.extend((self.dungeon.height() as u32).to_le_bytes());
        for cell in self.dungeon.cells() {
            bytes.push(match cell.kind {
                CellKind::Empty => 0,
                CellKind::Stone => 1,
                CellKind::Room => 2,
                CellKind::Hall => 3,
                CellKind::UpStairs => 4,
                CellKind::DownStairs => 5,
            });
            bytes.push(cell.hardness);
            bytes.push(u8::from(cell.immutable));
        }
        bytes.extend((self.dungeon.rooms().len() as u32).to_le_bytes());
        for room in self.dungeon.rooms() {
            for coord in [room.x0, room.y0, room.x1, room.y1] {
                bytes.extend(coord.to_le_bytes());
            }
        }
        bytes.extend(self.player_start.y.to_le_bytes());
        bytes.extend(self.player_start.x.to_le_bytes());
        bytes
    }
}
