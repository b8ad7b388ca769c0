//! Per-instance mirror of the shared board
//!
//! Rendering never touches shared memory directly; it reads this mirror,
//! which is refreshed from the [`BoardStore`] after local writes and on
//! peer notifications.

use crate::shared::BoardStore;
use crate::types::{Cell, CellPos, GridSize, MAX_GRID_SIZE};
use tracing::trace;

/// Local copy of the visible part of the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: GridSize,
    cells: [[Cell; MAX_GRID_SIZE]; MAX_GRID_SIZE],
}

impl Board {
    pub fn new(size: GridSize) -> Self {
        Self { size, cells: [[Cell::Empty; MAX_GRID_SIZE]; MAX_GRID_SIZE] }
    }

    pub fn get(&self, pos: CellPos) -> Cell {
        self.cells[pos.y()][pos.x()]
    }

    /// Set a cell directly, used when no shared store is attached
    pub fn set(&mut self, pos: CellPos, cell: Cell) {
        self.cells[pos.y()][pos.x()] = cell;
    }

    /// Copy the visible cells out of the shared store.
    ///
    /// Returns `false` and leaves the mirror untouched when the store is
    /// detached. The copy is not a snapshot: cells written by another process
    /// during the copy may or may not be picked up.
    pub fn refresh_from(&mut self, store: &BoardStore) -> bool {
        if !store.is_attached() {
            return false;
        }
        for pos in self.size.positions() {
            if let Some(cell) = store.read(pos) {
                self.cells[pos.y()][pos.x()] = cell;
            }
        }
        trace!(size = %self.size, "Refreshed board mirror");
        true
    }

    /// Non-empty visible cells, row by row
    pub fn marks(&self) -> impl Iterator<Item = (CellPos, Cell)> + '_ {
        self.size.positions().map(|pos| (pos, self.get(pos))).filter(|(_, cell)| !cell.is_empty())
    }
}
