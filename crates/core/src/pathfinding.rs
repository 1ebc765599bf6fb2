//! Player-centred distance fields over the dungeon, one with tunneling and one without.
//! Both are full Dijkstra solves over the shared min-heap, rebuilt after every player move.
//! It does not decide which neighbour a monster takes; see the decision engine for that.

use crate::dungeon::Dungeon;
use crate::error::HeapError;
use crate::heap::MinHeap;
use crate::types::Pos;

pub const UNREACHABLE: u32 = u32::MAX;

/// Hardness removed by one unit of path cost, and by one dig.
pub const HARDNESS_PER_STEP: u8 = 85;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Traversal {
    Tunneling,
    Walking,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CostField {
    width: usize,
    height: usize,
    source: Pos,
    distances: Vec<u32>,
}

impl CostField {
    fn unreachable(width: usize, height: usize, source: Pos) -> Self {
        Self { width, height, source, distances: vec![UNREACHABLE; width * height] }
    }

    pub fn source(&self) -> Pos {
        self.source
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Out-of-bounds positions are unreachable.
    pub fn distance(&self, pos: Pos) -> u32 {
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= self.width || pos.y as usize >= self.height
        {
            return UNREACHABLE;
        }
        self.distances[self.index(pos)]
    }

    pub fn distances(&self) -> &[u32] {
        &self.distances
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CostFields {
    pub tunneling: CostField,
    pub walking: CostField,
}

impl CostFields {
    pub fn compute(dungeon: &Dungeon, source: Pos) -> Result<Self, HeapError> {
        Ok(Self {
            tunneling: compute_cost_field(dungeon, source, Traversal::Tunneling)?,
            walking: compute_cost_field(dungeon, source, Traversal::Walking)?,
        })
    }

    pub fn field(&self, traversal: Traversal) -> &CostField {
        match traversal {
            Traversal::Tunneling => &self.tunneling,
            Traversal::Walking => &self.walking,
        }
    }
}

/// Cost charged for leaving a cell of the given hardness.
pub fn step_cost(hardness: u8) -> u32 {
    if hardness == 0 { 1 } else { 1 + u32::from(hardness / HARDNESS_PER_STEP) }
}

fn is_excluded(dungeon: &Dungeon, pos: Pos, traversal: Traversal) -> bool {
    let Some(cell) = dungeon.cell(pos) else {
        return true;
    };
    cell.immutable
        || cell.hardness == u8::MAX
        || (traversal == Traversal::Walking && !cell.is_passable())
}

pub fn compute_cost_field(
    dungeon: &Dungeon,
    source: Pos,
    traversal: Traversal,
) -> Result<CostField, HeapError> {
    let mut field = CostField::unreachable(dungeon.width(), dungeon.height(), source);
    if !dungeon.in_bounds(source) {
        return Ok(field);
    }

    let source_index = field.index(source);
    field.distances[source_index] = 0;

    let mut finalized = vec![true; field.distances.len()];
    let mut queue = MinHeap::new();
    for pos in dungeon.positions() {
        if pos != source && is_excluded(dungeon, pos, traversal) {
            continue;
        }
        let idx = field.index(pos);
        finalized[idx] = false;
        queue.insert(pos, field.distances[idx]);
    }

    while !queue.is_empty() {
        let (pos, distance) = queue.remove_min()?;
        if distance == UNREACHABLE {
            break;
        }
        finalized[field.index(pos)] = true;

        let candidate = distance.saturating_add(step_cost(dungeon.hardness_at(pos)));
        for next in pos.neighbors8() {
            if !dungeon.in_bounds(next) {
                continue;
            }
            let next_index = field.index(next);
            if finalized[next_index] || candidate >= field.distances[next_index] {
                continue;
            }
            field.distances[next_index] = candidate;
            queue.decrease_priority(candidate, |item| *item == next)?;
        }
    }

    Ok(field)
}
