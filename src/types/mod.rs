//! Core value types shared by the board store, the renderer and the settings.
//!
//! - [`Cell`] is one board cell, encoded as a single byte in shared memory
//! - [`GridSize`] is the rendered board side, always within 1..=10
//! - [`CellPos`] addresses a cell in the full-size shared layout
//! - [`Rgb`] is a colour from the settings file
//!
//! ```rust
//! use tictactoe::types::{Cell, CellPos, GridSize};
//!
//! let size = GridSize::new(3).unwrap();
//! let corner = CellPos::new(2, 2).unwrap();
//! assert_eq!(size.clamp(7, 2), corner);
//! assert_eq!(corner.offset(), 22);
//! assert_eq!(Cell::from_byte(b'X'), Cell::Cross);
//! ```

mod cell;
mod color;
mod grid;

pub use cell::{CROSS_BYTE, Cell, EMPTY_BYTE, NOUGHT_BYTE};
pub use color::{Rgb, WheelDirection};
pub use grid::{CellPos, DEFAULT_GRID_SIZE, GridSize, MAX_GRID_SIZE};
