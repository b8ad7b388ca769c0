//! Native game window
//!
//! The window is a plain Win32 window painted with GDI. It owns the
//! [`Session`] for its lifetime, feeds it input events and repaints when the
//! session asks for it. Peer updates arrive as a registered window message
//! posted by other instances.
//!
//! On other platforms [`run`] reports an unsupported-platform error; the
//! board, settings and notification layers remain usable as a library.

#[cfg(windows)]
mod gdi;
#[cfg(windows)]
mod window;

use crate::Result;
use crate::session::Session;
use std::path::PathBuf;

/// Title of the game window
pub const WINDOW_TITLE: &str = "Tic-tac-toe";

/// Open the window and dispatch events until it closes.
///
/// Settings are written to `settings_path` when the window is destroyed.
#[cfg(windows)]
pub fn run(session: Session, settings_path: PathBuf) -> Result<()> {
    window::run(session, settings_path)
}

#[cfg(not(windows))]
pub fn run(session: Session, settings_path: PathBuf) -> Result<()> {
    let _ = (session, settings_path);
    Err(crate::GameError::unsupported_platform("Native game window", "Windows"))
}
