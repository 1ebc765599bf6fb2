//! Stone hardness diffusion and smoothing, the first two generation phases.

use std::collections::VecDeque;

use crate::dungeon::Dungeon;
use crate::rng::DungeonRng;
use crate::types::Pos;

const SMOOTHING_KERNEL: [[u32; 5]; 5] = [
    [1, 4, 7, 4, 1],
    [4, 16, 26, 16, 4],
    [7, 26, 41, 26, 7],
    [4, 16, 26, 16, 4],
    [1, 4, 7, 4, 1],
];

/// Resets every cell to Stone and spreads `seed_count` hardness values outward until no cell is 0.
pub(super) fn fill_stone(dungeon: &mut Dungeon, seed_count: usize, rng: &mut DungeonRng) {
    for pos in dungeon.positions() {
        dungeon.set_stone(pos, 0);
    }

    let cell_count = dungeon.width() * dungeon.height();
    let seed_count = seed_count.clamp(1, cell_count);
    let step = (255 / seed_count as u32).saturating_sub(1).max(1);

    let mut frontier = VecDeque::with_capacity(cell_count);
    for seed_index in 0..seed_count as u32 {
        let hardness = if seed_index == 0 { 1 } else { (seed_index * step).clamp(1, 254) as u8 };
        let pos = loop {
            let candidate = Pos {
                y: rng.below(dungeon.height()) as i32,
                x: rng.below(dungeon.width()) as i32,
            };
            if dungeon.hardness_at(candidate) == 0 {
                break candidate;
            }
        };
        dungeon.set_stone(pos, hardness);
        frontier.push_back(pos);
    }

    while let Some(pos) = frontier.pop_front() {
        let hardness = dungeon.hardness_at(pos);
        for next in pos.neighbors8() {
            if dungeon.in_bounds(next) && dungeon.hardness_at(next) == 0 {
                dungeon.set_stone(next, hardness);
                frontier.push_back(next);
            }
        }
    }
}

/// Runs `passes` 5x5 weighted-average sweeps, normalising by the in-bounds kernel weight.
/// Each sweep updates cells in place, x outer and y inner, so later cells read already
/// smoothed neighbours.
pub(super) fn smooth_hardness(dungeon: &mut Dungeon, passes: u32) {
    let (width, height) = (dungeon.width() as i32, dungeon.height() as i32);
    for _ in 0..passes {
        for x in 0..width {
            for y in 0..height {
                let pos = Pos { y, x };
                let mut total = 0_u32;
                let mut weight = 0_u32;
                for (ky, row) in SMOOTHING_KERNEL.iter().enumerate() {
                    for (kx, &kernel_weight) in row.iter().enumerate() {
                        let sample = pos.offset(kx as i32 - 2, ky as i32 - 2);
                        if dungeon.in_bounds(sample) {
                            total += kernel_weight * u32::from(dungeon.hardness_at(sample));
                            weight += kernel_weight;
                        }
                    }
                }
                dungeon.set_stone(pos, (total / weight) as u8);
            }
        }
    }
}
