//! Window-message broadcast to every game window on the desktop

use super::{Notifier, WINDOW_CLASS};
use tracing::{trace, warn};
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetClassNameW, PostMessageW, RegisterWindowMessageW,
};
use windows::core::{BOOL, PCWSTR};

/// Name of the system-wide registered message
pub const UPDATE_MESSAGE_NAME: &str = "TicTacToe_UpdateBoard";

/// Register (or look up) the update message identifier. Every process gets
/// the same identifier for the same name.
pub fn register_update_message() -> u32 {
    let name = crate::wide_string(UPDATE_MESSAGE_NAME);
    unsafe { RegisterWindowMessageW(PCWSTR::from_raw(name.as_ptr())) }
}

/// Posts the update message to every other window of [`WINDOW_CLASS`]
#[derive(Debug, Clone, Copy)]
pub struct WindowBroadcast {
    sender: HWND,
    message: u32,
}

struct Enumeration {
    sender: HWND,
    message: u32,
    class: Vec<u16>,
    posted: usize,
}

impl WindowBroadcast {
    pub fn new(sender: HWND, message: u32) -> Self {
        Self { sender, message }
    }
}

impl Notifier for WindowBroadcast {
    fn notify_peers(&self) {
        let mut state = Enumeration {
            sender: self.sender,
            message: self.message,
            class: WINDOW_CLASS.encode_utf16().collect(),
            posted: 0,
        };

        let result =
            unsafe { EnumWindows(Some(post_to_sibling), LPARAM(&mut state as *mut _ as isize)) };
        if let Err(e) = result {
            warn!("EnumWindows failed: {}", e);
        }
        trace!(posted = state.posted, "Broadcast board update");
    }
}

unsafe extern "system" fn post_to_sibling(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam is the &mut Enumeration passed to EnumWindows, which
    // only calls back synchronously.
    let state = unsafe { &mut *(lparam.0 as *mut Enumeration) };

    let mut class = [0u16; 256];
    let len = unsafe { GetClassNameW(hwnd, &mut class) };
    let len = usize::try_from(len).unwrap_or(0);

    if hwnd != state.sender && class[..len] == state.class[..] {
        match unsafe { PostMessageW(Some(hwnd), state.message, WPARAM(0), LPARAM(0)) } {
            Ok(()) => state.posted += 1,
            Err(e) => warn!("PostMessageW failed: {}", e),
        }
    }

    true.into()
}
