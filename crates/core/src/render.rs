//! Plain-text views of a level for terminals and debugging dumps.

use std::io::{self, Write};

use slotmap::SlotMap;

use crate::dungeon::Dungeon;
use crate::pathfinding::{CostField, UNREACHABLE};
use crate::state::Actor;
use crate::types::{ActorId, CellKind, Pos};

pub fn cell_glyph(kind: CellKind) -> char {
    match kind {
        CellKind::Empty | CellKind::Stone => ' ',
        CellKind::Room => '.',
        CellKind::Hall => '#',
        CellKind::UpStairs => '<',
        CellKind::DownStairs => '>',
    }
}

/// One line per row; living actors are drawn over the cell they stand on.
pub fn render_dungeon(dungeon: &Dungeon, actors: &SlotMap<ActorId, Actor>) -> String {
    let width = dungeon.width();
    let mut glyphs: Vec<char> = dungeon.cells().iter().map(|cell| cell_glyph(cell.kind)).collect();
    for actor in actors.values().filter(|actor| actor.alive) {
        if dungeon.in_bounds(actor.pos) {
            glyphs[actor.pos.y as usize * width + actor.pos.x as usize] = actor.glyph();
        }
    }
    rows(&glyphs, width)
}

/// Last decimal digit of each reachable distance, `@` at the source.
pub fn render_cost_field(field: &CostField) -> String {
    let width = field.width();
    let glyphs: Vec<char> = field
        .distances()
        .iter()
        .enumerate()
        .map(|(idx, &distance)| {
            let pos = Pos { y: (idx / width) as i32, x: (idx % width) as i32 };
            if pos == field.source() {
                '@'
            } else if distance == UNREACHABLE {
                ' '
            } else {
                char::from(b'0' + (distance % 10) as u8)
            }
        })
        .collect();
    rows(&glyphs, width)
}

/// Binary greymap of the hardness matrix.
pub fn write_hardness_pgm<W: Write>(writer: &mut W, dungeon: &Dungeon) -> io::Result<()> {
    write!(writer, "P5\n{} {}\n255\n", dungeon.width(), dungeon.height())?;
    writer.write_all(&dungeon.hardness_matrix())
}

fn rows(glyphs: &[char], width: usize) -> String {
    let mut out = String::with_capacity(glyphs.len() + glyphs.len() / width.max(1));
    for row in glyphs.chunks(width.max(1)) {
        out.extend(row);
        out.push('\n');
    }
    out
}
