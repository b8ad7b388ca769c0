//! Multi-instance tic-tac-toe with a board shared between processes.
//!
//! Every running instance on a machine draws the same board. Marks placed in
//! one window appear in all the others: the board lives in a named shared
//! memory segment, and the writer posts a "board changed" notification so
//! that the other windows re-read it and repaint.
//!
//! # Features
//!
//! - **Shared board**: fixed 10×10 byte layout, whatever grid size a window shows
//! - **Best effort**: without shared memory an instance keeps a local board
//! - **Settings**: grid size, window size and colours persisted in `settings.yaml`
//! - **Native window**: Win32/GDI on Windows; the core library is cross-platform
//!
//! ## Example
//!
//! ```rust
//! use tictactoe::board::Board;
//! use tictactoe::shared::BoardStore;
//! use tictactoe::types::{Cell, CellPos, GridSize};
//!
//! let mut board = Board::new(GridSize::default());
//! board.refresh_from(&BoardStore::detached());
//! assert_eq!(board.get(CellPos::new(0, 0).unwrap()), Cell::Empty);
//! ```

mod error;
#[cfg_attr(any(test, feature = "benchmark"), path = "test_utils.rs")]
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Board state
pub mod board;
pub mod notify;
pub mod shared;

// Configuration
pub mod cli;
pub mod config;

// Presentation
pub mod alert;
pub mod gui;
pub mod layout;
pub mod render;
pub mod session;

pub use error::*;
pub use types::*;

pub use board::Board;
pub use config::Settings;
pub use session::Session;
pub use shared::BoardStore;

/// Convert string to null-terminated wide string for Windows APIs
#[cfg(windows)]
pub(crate) fn wide_string(s: &str) -> Vec<u16> {
    use std::ffi::OsStr;
    use std::os::windows::ffi::OsStrExt;
    OsStr::new(s).encode_wide().chain(std::iter::once(0)).collect()
}
