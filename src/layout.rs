//! Pixel geometry of the board inside the window's client area

use crate::types::{CellPos, GridSize};

/// Pixel position in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Pixel rectangle, right and bottom exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Shrink by `amount` on every side
    pub fn inset(self, amount: i32) -> Self {
        Self {
            left: self.left + amount,
            top: self.top + amount,
            right: self.right - amount,
            bottom: self.bottom - amount,
        }
    }
}

/// Board geometry for one client-area size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    size: GridSize,
    width: i32,
    height: i32,
}

impl Layout {
    pub fn new(size: GridSize, width: i32, height: i32) -> Self {
        Self { size, width: width.max(0), height: height.max(0) }
    }

    /// Whole client area
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Cell width in pixels, never zero
    pub fn cell_width(&self) -> i32 {
        (self.width / self.side()).max(1)
    }

    /// Cell height in pixels, never zero
    pub fn cell_height(&self) -> i32 {
        (self.height / self.side()).max(1)
    }

    /// Map a click to the cell under it. Pixels past the last full cell
    /// (rounding slack at the right and bottom edges) belong to the last
    /// column or row.
    pub fn hit_test(&self, point: Point) -> CellPos {
        let x = (point.x.max(0) / self.cell_width()) as usize;
        let y = (point.y.max(0) / self.cell_height()) as usize;
        self.size.clamp(x, y)
    }

    /// Pixel rectangle of a cell
    pub fn cell_rect(&self, pos: CellPos) -> Rect {
        let (w, h) = (self.cell_width(), self.cell_height());
        let left = pos.x() as i32 * w;
        let top = pos.y() as i32 * h;
        Rect::new(left, top, left + w, top + h)
    }

    /// Separator lines between cells: vertical ones first, then horizontal,
    /// each spanning the whole client area.
    pub fn separators(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let inner = 1..self.side();
        let vertical = inner.clone().map(move |i| {
            let x = self.cell_width() * i;
            (Point::new(x, 0), Point::new(x, self.height))
        });
        let horizontal = inner.map(move |i| {
            let y = self.cell_height() * i;
            (Point::new(0, y), Point::new(self.width, y))
        });
        vertical.chain(horizontal)
    }

    fn side(&self) -> i32 {
        self.size.get() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid(n: u64) -> GridSize {
        GridSize::new(n).unwrap()
    }

    #[test]
    fn clicks_map_to_cells() {
        let layout = Layout::new(grid(3), 300, 300);
        assert_eq!(layout.hit_test(Point::new(0, 0)), CellPos::new(0, 0).unwrap());
        assert_eq!(layout.hit_test(Point::new(150, 50)), CellPos::new(1, 0).unwrap());
        assert_eq!(layout.hit_test(Point::new(299, 299)), CellPos::new(2, 2).unwrap());
    }

    #[test]
    fn edge_slack_clamps_to_last_cell() {
        // 304 / 3 = 101, so pixels 303 and above fall past the third cell.
        let layout = Layout::new(grid(3), 304, 304);
        assert_eq!(layout.hit_test(Point::new(303, 303)), CellPos::new(2, 2).unwrap());
    }

    #[test]
    fn separators_sit_on_cell_boundaries() {
        let layout = Layout::new(grid(3), 304, 200);
        let lines: Vec<_> = layout.separators().collect();
        assert_eq!(
            lines,
            vec![
                (Point::new(101, 0), Point::new(101, 200)),
                (Point::new(202, 0), Point::new(202, 200)),
                (Point::new(0, 66), Point::new(304, 66)),
                (Point::new(0, 132), Point::new(304, 132)),
            ]
        );
    }

    #[test]
    fn single_cell_grid_has_no_separators() {
        let layout = Layout::new(grid(1), 200, 200);
        assert_eq!(layout.separators().count(), 0);
        assert_eq!(layout.hit_test(Point::new(199, 5)), CellPos::new(0, 0).unwrap());
    }

    #[test]
    fn degenerate_client_area_does_not_divide_by_zero() {
        let layout = Layout::new(grid(10), 0, 5);
        assert_eq!(layout.cell_width(), 1);
        assert_eq!(layout.hit_test(Point::new(50, 50)), CellPos::new(9, 9).unwrap());
    }

    #[test]
    fn cell_rect_matches_hit_test() {
        let layout = Layout::new(grid(4), 400, 320);
        let pos = CellPos::new(3, 1).unwrap();
        let rect = layout.cell_rect(pos);
        assert_eq!(rect, Rect::new(300, 80, 400, 160));
        assert_eq!(layout.hit_test(Point::new(rect.left, rect.top)), pos);
        assert_eq!(rect.inset(10), Rect::new(310, 90, 390, 150));
    }

    proptest! {
        #[test]
        fn hit_test_is_clamped_integer_division(
            n in 1u64..=10,
            width in 200i32..2000,
            height in 200i32..2000,
            px in 0i32..2000,
            py in 0i32..2000,
        ) {
            let layout = Layout::new(grid(n), width, height);
            let (cw, ch) = (width / n as i32, height / n as i32);
            let last = n as i32 - 1;

            let pos = layout.hit_test(Point::new(px, py));
            prop_assert_eq!(pos.x() as i32, (px / cw).min(last));
            prop_assert_eq!(pos.y() as i32, (py / ch).min(last));
        }
    }
}
