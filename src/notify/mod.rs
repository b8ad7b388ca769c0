//! "Board changed" notifications between instances
//!
//! After writing to the shared board, an instance tells every other instance
//! to re-read it. Delivery is fire-and-forget: the sender never waits and never
//! learns whether anyone refreshed. Receivers simply re-read the whole visible
//! board, so a notification carries no payload.
//!
//! Two transports exist:
//!
//! - `WindowBroadcast` (Windows): posts a registered window message to every
//!   top-level window of the game's class. Receipt arrives through the
//!   window's own message queue.
//! - [`LocalBus`]: a broadcast channel connecting sessions that live in the
//!   same process.

mod local;
#[cfg(windows)]
mod win32;

pub use local::{LocalBus, LocalPeer};
#[cfg(windows)]
pub use win32::{UPDATE_MESSAGE_NAME, WindowBroadcast, register_update_message};

/// Window class shared by every game window
pub const WINDOW_CLASS: &str = "TicTacToeWindowClass";

/// Transport for "board changed" notifications
pub trait Notifier {
    /// Tell every other instance that the shared board changed.
    ///
    /// Never blocks and never notifies the sender itself.
    fn notify_peers(&self);

    /// Drain notifications received through this transport and return how
    /// many arrived. Transports whose notifications arrive through the OS
    /// message queue always report zero.
    fn pending(&mut self) -> usize {
        0
    }
}

/// Notifier for an instance without a shared board
#[derive(Debug, Default, Clone, Copy)]
pub struct Detached;

impl Notifier for Detached {
    fn notify_peers(&self) {}
}
