//! Immediate-mode painting of the board
//!
//! [`paint`] issues drawing commands against a [`Canvas`]; the window layer
//! implements the canvas with GDI. Every repaint redraws everything:
//! background, separators, then each mark in the mirror.

use crate::board::Board;
use crate::layout::{Layout, Point, Rect};
use crate::types::{Cell, Rgb};

/// Separator pen width
pub const GRID_PEN_WIDTH: i32 = 4;
/// Cross and nought pen width
pub const MARK_PEN_WIDTH: i32 = 8;
/// Gap between a cell border and its mark
pub const MARK_INSET: i32 = 10;

/// Line style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    Solid,
    Dotted,
}

/// Outline pen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pen {
    pub color: Rgb,
    pub width: i32,
    pub stroke: Stroke,
}

/// Drawing surface
pub trait Canvas {
    /// Fill a rectangle with a solid colour
    fn fill(&mut self, area: Rect, color: Rgb);

    /// Straight line between two points
    fn line(&mut self, from: Point, to: Point, pen: Pen);

    /// Unfilled ellipse inscribed in `bounds`
    fn ellipse(&mut self, bounds: Rect, pen: Pen);
}

/// Colours used for one repaint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub lines: Rgb,
    pub cross: Rgb,
    pub nought: Rgb,
}

impl Palette {
    /// Marks are always white crosses and black noughts
    pub fn new(background: Rgb, lines: Rgb) -> Self {
        Self { background, lines, cross: Rgb::WHITE, nought: Rgb::BLACK }
    }
}

/// Draw the whole board
pub fn paint(canvas: &mut impl Canvas, layout: &Layout, board: &Board, palette: &Palette) {
    canvas.fill(layout.bounds(), palette.background);

    let grid_pen = Pen { color: palette.lines, width: GRID_PEN_WIDTH, stroke: Stroke::Dotted };
    for (from, to) in layout.separators() {
        canvas.line(from, to, grid_pen);
    }

    for (pos, cell) in board.marks() {
        let area = layout.cell_rect(pos).inset(MARK_INSET);
        match cell {
            Cell::Cross => draw_cross(canvas, area, palette.cross),
            Cell::Nought => draw_nought(canvas, area, palette.nought),
            Cell::Empty => {}
        }
    }
}

fn draw_cross(canvas: &mut impl Canvas, area: Rect, color: Rgb) {
    let pen = Pen { color, width: MARK_PEN_WIDTH, stroke: Stroke::Solid };
    canvas.line(Point::new(area.left, area.top), Point::new(area.right, area.bottom), pen);
    canvas.line(Point::new(area.left, area.bottom), Point::new(area.right, area.top), pen);
}

fn draw_nought(canvas: &mut impl Canvas, area: Rect, color: Rgb) {
    let pen = Pen { color, width: MARK_PEN_WIDTH, stroke: Stroke::Solid };
    canvas.ellipse(area, pen);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellPos, GridSize};

    #[derive(Debug, PartialEq)]
    enum Op {
        Fill(Rect, Rgb),
        Line(Point, Point, Pen),
        Ellipse(Rect, Pen),
    }

    #[derive(Default)]
    struct Recorder(Vec<Op>);

    impl Canvas for Recorder {
        fn fill(&mut self, area: Rect, color: Rgb) {
            self.0.push(Op::Fill(area, color));
        }
        fn line(&mut self, from: Point, to: Point, pen: Pen) {
            self.0.push(Op::Line(from, to, pen));
        }
        fn ellipse(&mut self, bounds: Rect, pen: Pen) {
            self.0.push(Op::Ellipse(bounds, pen));
        }
    }

    fn palette() -> Palette {
        Palette::new(Rgb::new(45, 73, 255), Rgb::new(255, 48, 55))
    }

    #[test]
    fn empty_board_paints_background_and_separators() {
        let size = GridSize::new(3).unwrap();
        let layout = Layout::new(size, 300, 300);
        let mut canvas = Recorder::default();

        paint(&mut canvas, &layout, &Board::new(size), &palette());

        assert_eq!(canvas.0[0], Op::Fill(Rect::new(0, 0, 300, 300), Rgb::new(45, 73, 255)));
        let lines = canvas.0.iter().filter(|op| matches!(op, Op::Line(..))).count();
        assert_eq!(lines, 4);
        assert!(canvas.0.iter().all(|op| match op {
            Op::Line(_, _, pen) => pen.stroke == Stroke::Dotted && pen.width == GRID_PEN_WIDTH,
            _ => true,
        }));
    }

    #[test]
    fn marks_are_drawn_inset_in_their_cells() {
        let size = GridSize::new(3).unwrap();
        let layout = Layout::new(size, 300, 300);
        let mut board = Board::new(size);
        board.set(CellPos::new(0, 0).unwrap(), Cell::Cross);
        board.set(CellPos::new(2, 1).unwrap(), Cell::Nought);
        let mut canvas = Recorder::default();

        paint(&mut canvas, &layout, &board, &palette());

        let white = Pen { color: Rgb::WHITE, width: MARK_PEN_WIDTH, stroke: Stroke::Solid };
        let black = Pen { color: Rgb::BLACK, width: MARK_PEN_WIDTH, stroke: Stroke::Solid };
        let marks = &canvas.0[5..];
        assert_eq!(
            marks,
            &[
                Op::Line(Point::new(10, 10), Point::new(90, 90), white),
                Op::Line(Point::new(10, 90), Point::new(90, 10), white),
                Op::Ellipse(Rect::new(210, 110, 290, 190), black),
            ]
        );
    }
}
