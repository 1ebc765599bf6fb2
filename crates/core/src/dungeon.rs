//! Cell grid, room list, and per-cell attributes for one dungeon level.
//! Cells live in a flat buffer indexed by `y * width + x`.
//! It does not own actors; occupant slots hold arena keys only.

use crate::types::{ActorId, CellKind, Pos};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub kind: CellKind,
    pub hardness: u8,
    pub immutable: bool,
    pub occupant: Option<ActorId>,
}

impl Cell {
    pub fn is_passable(&self) -> bool {
        matches!(
            self.kind,
            CellKind::Room | CellKind::Hall | CellKind::UpStairs | CellKind::DownStairs
        )
    }
}

/// Inclusive rectangle `(x0, y0)..=(x1, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Room {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Room {
    pub fn from_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x0: x, y0: y, x1: x + width - 1, y1: y + height - 1 }
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0 + 1
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0 + 1
    }

    pub fn center(&self) -> Pos {
        Pos { y: (self.y0 + self.y1) / 2, x: (self.x0 + self.x1) / 2 }
    }

    pub fn contains(&self, pos: Pos) -> bool {
        (self.x0..=self.x1).contains(&pos.x) && (self.y0..=self.y1).contains(&pos.y)
    }

    pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (self.y0..=self.y1).flat_map(move |y| (self.x0..=self.x1).map(move |x| Pos { y, x }))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DigOutcome {
    /// Hardness reached zero and the cell is now Hall.
    Opened,
    Weakened { remaining: u8 },
    Refused,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dungeon {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    rooms: Vec<Room>,
}

impl Dungeon {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![Cell::default(); width * height], rooms: Vec::new() }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn is_border(&self, pos: Pos) -> bool {
        self.in_bounds(pos)
            && (pos.x == 0
                || pos.y == 0
                || pos.x as usize == self.width - 1
                || pos.y as usize == self.height - 1)
    }

    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(&self.cells[self.index(pos)])
    }

    pub fn cell_mut(&mut self, pos: Pos) -> Option<&mut Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        let idx = self.index(pos);
        Some(&mut self.cells[idx])
    }

    /// Out-of-bounds positions read as Stone.
    pub fn kind_at(&self, pos: Pos) -> CellKind {
        self.cell(pos).map_or(CellKind::Stone, |cell| cell.kind)
    }

    pub fn hardness_at(&self, pos: Pos) -> u8 {
        self.cell(pos).map_or(u8::MAX, |cell| cell.hardness)
    }

    pub fn is_stone(&self, pos: Pos) -> bool {
        self.kind_at(pos) == CellKind::Stone
    }

    pub fn is_immutable(&self, pos: Pos) -> bool {
        self.cell(pos).is_none_or(|cell| cell.immutable)
    }

    pub fn is_passable(&self, pos: Pos) -> bool {
        self.cell(pos).is_some_and(Cell::is_passable)
    }

    pub fn occupant_at(&self, pos: Pos) -> Option<ActorId> {
        self.cell(pos).and_then(|cell| cell.occupant)
    }

    pub fn set_occupant(&mut self, pos: Pos, occupant: Option<ActorId>) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.occupant = occupant;
        }
    }

    /// Rewrites a mutable cell as a passage of `kind` with hardness 0.
    pub fn carve(&mut self, pos: Pos, kind: CellKind) -> bool {
        match self.cell_mut(pos) {
            Some(cell) if !cell.immutable => {
                cell.kind = kind;
                cell.hardness = 0;
                true
            }
            _ => false,
        }
    }

    pub fn set_stone(&mut self, pos: Pos, hardness: u8) {
        if let Some(cell) = self.cell_mut(pos)
            && !cell.immutable
        {
            cell.kind = CellKind::Stone;
            cell.hardness = hardness;
        }
    }

    /// Chips `strength` off a mutable Stone cell, opening it as Hall once it reaches 0.
    pub fn dig(&mut self, pos: Pos, strength: u8) -> DigOutcome {
        let Some(cell) = self.cell_mut(pos) else {
            return DigOutcome::Refused;
        };
        if cell.immutable || cell.kind != CellKind::Stone {
            return DigOutcome::Refused;
        }
        cell.hardness = cell.hardness.saturating_sub(strength);
        if cell.hardness > 0 {
            return DigOutcome::Weakened { remaining: cell.hardness };
        }
        cell.kind = CellKind::Hall;
        DigOutcome::Opened
    }

    pub fn seal_border(&mut self) {
        for pos in self.positions().collect::<Vec<_>>() {
            if self.is_border(pos) {
                let idx = self.index(pos);
                let cell = &mut self.cells[idx];
                cell.kind = CellKind::Stone;
                cell.hardness = u8::MAX;
                cell.immutable = true;
            }
        }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn add_room(&mut self, room: Room) {
        for pos in room.cells() {
            self.carve(pos, CellKind::Room);
        }
        self.rooms.push(room);
    }

    /// Every position, y outer and x inner.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| Pos { y, x }))
    }

    /// Staircases of `kind`, scanned x outer and y inner.
    pub fn staircases(&self, kind: CellKind) -> Vec<Pos> {
        let mut found = Vec::new();
        for x in 0..self.width as i32 {
            for y in 0..self.height as i32 {
                let pos = Pos { y, x };
                if self.kind_at(pos) == kind {
                    found.push(pos);
                }
            }
        }
        found
    }

    pub fn hardness_matrix(&self) -> Vec<u8> {
        self.cells.iter().map(|cell| cell.hardness).collect()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}
