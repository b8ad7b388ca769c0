//! Grid dimensions and cell coordinates

use std::fmt;

/// Largest supported board side. The shared segment is always laid out as a
/// square of this size, whatever size an instance renders.
pub const MAX_GRID_SIZE: usize = 10;

/// Board side used when neither settings nor command line provide one
pub const DEFAULT_GRID_SIZE: u8 = 3;

/// Side length of the rendered board, in 1..=[`MAX_GRID_SIZE`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridSize(u8);

impl GridSize {
    /// Validate a requested side length
    pub fn new(side: u64) -> Option<Self> {
        if (1..=MAX_GRID_SIZE as u64).contains(&side) { Some(Self(side as u8)) } else { None }
    }

    /// Side length as an index bound
    pub fn get(self) -> usize {
        self.0 as usize
    }

    /// Every visible position, row by row
    pub fn positions(self) -> impl Iterator<Item = CellPos> {
        let side = self.0;
        (0..side).flat_map(move |y| (0..side).map(move |x| CellPos { x, y }))
    }

    /// Nearest visible position, clamping each coordinate to the last row
    /// or column
    pub fn clamp(self, x: usize, y: usize) -> CellPos {
        let last = self.0 as usize - 1;
        CellPos { x: x.min(last) as u8, y: y.min(last) as u8 }
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self(DEFAULT_GRID_SIZE)
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.0, self.0)
    }
}

impl From<GridSize> for u8 {
    fn from(size: GridSize) -> Self {
        size.0
    }
}

/// Coordinates of a cell inside the full-size shared layout
///
/// Both coordinates are below [`MAX_GRID_SIZE`], so every `CellPos` addresses
/// a byte inside the segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPos {
    x: u8,
    y: u8,
}

impl CellPos {
    pub fn new(x: usize, y: usize) -> Option<Self> {
        if x < MAX_GRID_SIZE && y < MAX_GRID_SIZE {
            Some(Self { x: x as u8, y: y as u8 })
        } else {
            None
        }
    }

    /// Column
    pub fn x(self) -> usize {
        self.x as usize
    }

    /// Row
    pub fn y(self) -> usize {
        self.y as usize
    }

    /// Byte offset in the shared layout. The stride is always
    /// [`MAX_GRID_SIZE`], never the rendered grid size.
    pub fn offset(self) -> usize {
        self.y() * MAX_GRID_SIZE + self.x()
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_size_bounds() {
        assert!(GridSize::new(0).is_none());
        assert_eq!(GridSize::new(1).map(GridSize::get), Some(1));
        assert_eq!(GridSize::new(10).map(GridSize::get), Some(10));
        assert!(GridSize::new(11).is_none());
        assert_eq!(GridSize::default().get(), 3);
    }

    #[test]
    fn clamp_keeps_positions_visible() {
        let size = GridSize::new(4).unwrap();
        assert_eq!(size.clamp(2, 1), CellPos::new(2, 1).unwrap());
        assert_eq!(size.clamp(7, 100), CellPos::new(3, 3).unwrap());
    }

    #[test]
    fn positions_cover_visible_board_row_major() {
        let size = GridSize::new(3).unwrap();
        let positions: Vec<_> = size.positions().map(|p| (p.x(), p.y())).collect();
        assert_eq!(positions.len(), 9);
        assert_eq!(positions[0], (0, 0));
        assert_eq!(positions[1], (1, 0));
        assert_eq!(positions[3], (0, 1));
        assert_eq!(positions[8], (2, 2));
    }

    #[test]
    fn offset_uses_full_size_stride() {
        let pos = CellPos::new(2, 2).unwrap();
        assert_eq!(pos.offset(), 22);
        let last = CellPos::new(9, 9).unwrap();
        assert_eq!(last.offset(), MAX_GRID_SIZE * MAX_GRID_SIZE - 1);
        assert!(CellPos::new(10, 0).is_none());
        assert!(CellPos::new(0, 10).is_none());
    }
}
