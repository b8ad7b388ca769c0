//! Cross-process board storage
//!
//! The board lives in a small named shared memory segment so that every
//! running instance on the machine sees the same grid. The segment is always
//! laid out as a [`MAX_GRID_SIZE`] × [`MAX_GRID_SIZE`] byte array, one byte per
//! cell, whatever grid size an instance renders.
//!
//! # Consistency
//!
//! There is no lock. Each cell is a single byte, so individual reads and
//! writes never tear, but a read of the whole grid while another process is
//! writing observes an arbitrary mix of old and new marks. Concurrent writes
//! to the same cell resolve as "last write wins".
//!
//! # Lifecycle
//!
//! The first instance creates the segment and fills it with the empty
//! sentinel; later instances open it without clearing. When the last holder
//! releases it, or its process dies, the board is gone and the next
//! instance starts fresh.
//!
//! ```rust,no_run
//! use tictactoe::shared::BoardStore;
//! use tictactoe::types::{Cell, CellPos};
//!
//! let mut store = BoardStore::acquire_default().unwrap_or_else(|_| BoardStore::detached());
//! let centre = CellPos::new(1, 1).unwrap();
//! store.write(centre, Cell::Cross);
//! assert!(!store.is_attached() || store.read(centre) == Some(Cell::Cross));
//! ```

#[cfg(unix)]
mod posix;
#[cfg(windows)]
mod win32;

#[cfg(unix)]
use posix::Segment;
#[cfg(windows)]
use win32::Segment;

use crate::Result;
use crate::types::{Cell, CellPos, EMPTY_BYTE, MAX_GRID_SIZE};
use tracing::{debug, info, trace};

/// Number of board bytes at the start of the segment
pub const BOARD_BYTES: usize = MAX_GRID_SIZE * MAX_GRID_SIZE;

/// Well-known segment name shared by every instance
#[cfg(windows)]
pub const SEGMENT_NAME: &str = "Local\\TicTacToeSharedMemory";
/// Well-known segment name shared by every instance
#[cfg(not(windows))]
pub const SEGMENT_NAME: &str = "/tictactoe-board";

/// Best-effort shared board
///
/// A store is either attached to the named segment or detached. A detached
/// store ignores writes and yields nothing on reads, which is how an
/// instance keeps running when shared memory cannot be set up.
pub struct BoardStore {
    segment: Option<Segment>,
    first_instance: bool,
}

impl BoardStore {
    /// Open the segment by name, creating it if this is the first instance.
    ///
    /// On creation every cell is set to the empty sentinel.
    pub fn acquire(name: &str) -> Result<Self> {
        let (segment, created) = Segment::open(name)?;
        let mut store = Self { segment: Some(segment), first_instance: created };

        if created {
            store.fill(EMPTY_BYTE);
            info!(name, "Created shared board segment");
        } else {
            info!(name, "Attached to existing shared board segment");
        }

        Ok(store)
    }

    /// Open the segment under [`SEGMENT_NAME`]
    pub fn acquire_default() -> Result<Self> {
        Self::acquire(SEGMENT_NAME)
    }

    /// A store with no segment behind it
    pub fn detached() -> Self {
        Self { segment: None, first_instance: false }
    }

    /// Whether a segment is mapped
    pub fn is_attached(&self) -> bool {
        self.base().is_some()
    }

    /// Whether no other live instance held the board when this store
    /// acquired it, in which case the board was reset to empty
    pub fn is_first_instance(&self) -> bool {
        self.first_instance
    }

    /// Read one cell. `None` when detached.
    pub fn read(&self, pos: CellPos) -> Option<Cell> {
        let base = self.base()?;
        // SAFETY: CellPos::offset is below BOARD_BYTES and the mapping is at
        // least that long while the segment is held.
        let byte = unsafe { base.add(pos.offset()).read_volatile() };
        Some(Cell::from_byte(byte))
    }

    /// Write one cell. No-op when detached.
    pub fn write(&mut self, pos: CellPos, cell: Cell) {
        let Some(base) = self.base() else {
            trace!(%pos, "Board store detached, write ignored");
            return;
        };
        // SAFETY: see `read`.
        unsafe { base.add(pos.offset()).write_volatile(cell.to_byte()) };
        trace!(%pos, %cell, "Wrote shared cell");
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.fill(EMPTY_BYTE);
        debug!("Cleared shared board");
    }

    /// Unmap and close the segment. Safe to call more than once.
    pub fn release(&mut self) {
        if self.segment.take().is_some() {
            debug!("Released shared board segment");
        }
    }

    fn fill(&mut self, byte: u8) {
        let Some(base) = self.base() else { return };
        for offset in 0..BOARD_BYTES {
            // SAFETY: offset < BOARD_BYTES, within the mapping.
            unsafe { base.add(offset).write_volatile(byte) };
        }
    }

    fn base(&self) -> Option<*mut u8> {
        self.segment.as_ref().map(|segment| segment.base().as_ptr())
    }
}

impl std::fmt::Debug for BoardStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardStore")
            .field("attached", &self.is_attached())
            .field("first_instance", &self.first_instance)
            .finish()
    }
}
