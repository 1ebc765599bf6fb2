//! Rasterised lines between cells, used for line of sight and straight-line stepping.
//! The longer axis advances one cell per step; the other coordinate is rounded half up.

use crate::dungeon::Dungeon;
use crate::types::Pos;

/// Cells on the line from `from` to `to`, both endpoints included.
fn line(from: Pos, to: Pos) -> impl Iterator<Item = Pos> {
    let span = from.x.abs_diff(to.x).max(from.y.abs_diff(to.y)) as i32;
    (0..=span).map(move |t| line_point(from, to, t))
}

/// The `t`-th cell along the line, counting `from` as step 0.
fn line_point(from: Pos, to: Pos, t: i32) -> Pos {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx == 0 && dy == 0 {
        return from;
    }
    if dx.abs() >= dy.abs() {
        Pos { y: from.y + round_half_up(dy * t, dx.abs()), x: from.x + dx.signum() * t }
    } else {
        Pos { y: from.y + dy.signum() * t, x: from.x + round_half_up(dx * t, dy.abs()) }
    }
}

fn round_half_up(numerator: i32, denominator: i32) -> i32 {
    (2 * numerator + denominator).div_euclid(2 * denominator)
}

pub fn has_line_of_sight(dungeon: &Dungeon, from: Pos, to: Pos) -> bool {
    line(from, to).all(|pos| !dungeon.is_stone(pos))
}

/// First cell after `from` on the line towards `to`; `from` itself when they coincide.
pub fn step_toward(from: Pos, to: Pos) -> Pos {
    if from == to { from } else { line_point(from, to, 1) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::open_arena_dungeon;

    #[test]
    fn line_advances_one_cell_per_step_along_the_long_axis() {
        let cells: Vec<Pos> = line(Pos { y: 1, x: 1 }, Pos { y: 3, x: 7 }).collect();
        assert_eq!(cells.len(), 7);
        assert_eq!(cells.first(), Some(&Pos { y: 1, x: 1 }));
        assert_eq!(cells.last(), Some(&Pos { y: 3, x: 7 }));
        for pair in cells.windows(2) {
            assert_eq!(pair[1].x - pair[0].x, 1);
            assert!((0..=1).contains(&(pair[1].y - pair[0].y)));
        }
    }

    #[test]
    fn steep_lines_iterate_over_y() {
        let cells: Vec<Pos> = line(Pos { y: 8, x: 2 }, Pos { y: 2, x: 4 }).collect();
        assert_eq!(cells.len(), 7);
        assert!(cells.windows(2).all(|pair| pair[1].y - pair[0].y == -1));
        assert_eq!(cells[3], Pos { y: 5, x: 3 });
    }

    #[test]
    fn identical_points_always_see_each_other() {
        let dungeon = open_arena_dungeon();
        let wall = Pos { y: 0, x: 0 };
        assert!(has_line_of_sight(&dungeon, Pos { y: 3, x: 3 }, Pos { y: 3, x: 3 }));
        assert_eq!(line(wall, wall).collect::<Vec<_>>(), vec![wall]);
        assert_eq!(step_toward(wall, wall), wall);
    }

    #[test]
    fn stone_on_the_line_blocks_sight() {
        let mut dungeon = open_arena_dungeon();
        let viewer = Pos { y: 3, x: 2 };
        let target = Pos { y: 3, x: 8 };
        assert!(has_line_of_sight(&dungeon, viewer, target));
        dungeon.set_stone(Pos { y: 3, x: 5 }, 60);
        assert!(!has_line_of_sight(&dungeon, viewer, target));
        assert!(!has_line_of_sight(&dungeon, target, viewer));
        assert!(has_line_of_sight(&dungeon, viewer, Pos { y: 3, x: 4 }));
    }

    #[test]
    fn step_toward_moves_diagonally_when_both_axes_differ_equally() {
        assert_eq!(step_toward(Pos { y: 5, x: 5 }, Pos { y: 2, x: 2 }), Pos { y: 4, x: 4 });
        assert_eq!(step_toward(Pos { y: 5, x: 5 }, Pos { y: 5, x: 9 }), Pos { y: 5, x: 6 });
        assert_eq!(step_toward(Pos { y: 5, x: 5 }, Pos { y: 6, x: 9 }), Pos { y: 5, x: 6 });
    }
}
