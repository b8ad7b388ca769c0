//! User-facing alerts
//!
//! Problems the user should know about (bad settings file, rejected grid size,
//! no shared memory) are logged and, on Windows, also shown in a blocking
//! message box. The game keeps running after every alert.

use crate::GameError;
use tracing::{error, warn};

/// Alert icon and log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// Log an alert and, on Windows, block on a message box until dismissed
pub fn show(severity: Severity, title: &str, text: &str) {
    match severity {
        Severity::Warning => warn!(title, "{}", text),
        Severity::Error => error!(title, "{}", text),
    }

    #[cfg(windows)]
    message_box(severity, title, text);
}

/// Alert for an error, followed by what the game does about it
pub fn report(severity: Severity, title: &str, err: &GameError) {
    show(severity, title, &format!("{err}\n\n{}", err.hint()));
}

#[cfg(windows)]
fn message_box(severity: Severity, title: &str, text: &str) {
    use windows::Win32::UI::WindowsAndMessaging::{
        MB_ICONERROR, MB_ICONWARNING, MB_OK, MessageBoxW,
    };
    use windows::core::PCWSTR;

    let icon = match severity {
        Severity::Warning => MB_ICONWARNING,
        Severity::Error => MB_ICONERROR,
    };
    let text = crate::wide_string(text);
    let title = crate::wide_string(title);
    unsafe {
        MessageBoxW(None, PCWSTR::from_raw(text.as_ptr()), PCWSTR::from_raw(title.as_ptr()), MB_OK | icon);
    }
}
