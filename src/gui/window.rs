//! Win32 window, message loop and window procedure

use super::WINDOW_TITLE;
use super::gdi::GdiCanvas;
use crate::alert::{self, Severity};
use crate::config::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, WindowSize};
use crate::layout::Point;
use crate::notify::{WINDOW_CLASS, WindowBroadcast, register_update_message};
use crate::session::{Button, InputEvent, Key, Modifiers, Reaction, Session};
use crate::{GameError, Result};
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, POINT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{BeginPaint, EndPaint, InvalidateRect, PAINTSTRUCT};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetKeyState, VK_CONTROL, VK_ESCAPE, VK_RETURN, VK_SHIFT,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CS_HREDRAW, CS_VREDRAW, CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW,
    GetMessageW, GetWindowRect, IDC_ARROW, IDI_QUESTION, LoadCursorW, LoadIconW, MINMAXINFO, MSG,
    PostQuitMessage, RegisterClassW, TranslateMessage, WINDOW_EX_STYLE, WM_DESTROY,
    WM_ERASEBKGND, WM_GETMINMAXINFO, WM_KEYDOWN, WM_LBUTTONDOWN, WM_MOUSEWHEEL, WM_PAINT,
    WM_RBUTTONDOWN, WM_SIZE, WNDCLASSW, WS_OVERLAPPEDWINDOW, WS_VISIBLE,
};
use windows::core::PCWSTR;

const INITIAL_X: i32 = 200;
const INITIAL_Y: i32 = 200;
const EDITOR: &str = "notepad.exe";

struct WindowState {
    session: Session,
    settings_path: PathBuf,
}

// The window procedure has no user pointer; state lives with the UI thread.
thread_local! {
    static STATE: RefCell<Option<WindowState>> = const { RefCell::new(None) };
    static UPDATE_MESSAGE: Cell<u32> = const { Cell::new(0) };
}

pub(super) fn run(session: Session, settings_path: PathBuf) -> Result<()> {
    let window = session.settings().window;
    UPDATE_MESSAGE.with(|id| id.set(register_update_message()));
    STATE.with(|state| *state.borrow_mut() = Some(WindowState { session, settings_path }));

    let instance = unsafe { GetModuleHandleW(None) }
        .map_err(|e| GameError::windows_api_error("GetModuleHandleW", e))?;
    let class_name = crate::wide_string(WINDOW_CLASS);
    let title = crate::wide_string(WINDOW_TITLE);

    let class = WNDCLASSW {
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(window_proc),
        hInstance: instance.into(),
        hIcon: unsafe { LoadIconW(None, IDI_QUESTION) }
            .map_err(|e| GameError::windows_api_error("LoadIconW", e))?,
        hCursor: unsafe { LoadCursorW(None, IDC_ARROW) }
            .map_err(|e| GameError::windows_api_error("LoadCursorW", e))?,
        lpszClassName: PCWSTR::from_raw(class_name.as_ptr()),
        ..Default::default()
    };
    if unsafe { RegisterClassW(&class) } == 0 {
        return Err(GameError::windows_api_error("RegisterClassW", windows::core::Error::from_thread()));
    }

    let hwnd = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            PCWSTR::from_raw(class_name.as_ptr()),
            PCWSTR::from_raw(title.as_ptr()),
            WS_OVERLAPPEDWINDOW | WS_VISIBLE,
            INITIAL_X,
            INITIAL_Y,
            to_i32(window.width),
            to_i32(window.height),
            None,
            None,
            Some(instance.into()),
            None,
        )
    }
    .map_err(|e| GameError::windows_api_error("CreateWindowExW", e))?;

    let message = UPDATE_MESSAGE.with(Cell::get);
    with_session(|session| session.set_notifier(Box::new(WindowBroadcast::new(hwnd, message))));
    info!(?window, "Game window open");

    let mut msg = MSG::default();
    loop {
        let result = unsafe { GetMessageW(&mut msg, None, 0, 0) };
        if result.0 == 0 || result.0 == -1 {
            break;
        }
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    Ok(())
}

/// Run `f` against the session unless it is gone or already borrowed
fn with_session<R>(f: impl FnOnce(&mut Session) -> R) -> Option<R> {
    STATE.with(|state| {
        let mut state = state.try_borrow_mut().ok()?;
        state.as_mut().map(|state| f(&mut state.session))
    })
}

unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if msg != 0 && msg == UPDATE_MESSAGE.with(Cell::get) {
        dispatch(hwnd, InputEvent::PeerUpdate);
        return LRESULT(0);
    }

    match msg {
        WM_PAINT => {
            let mut ps = PAINTSTRUCT::default();
            let hdc = unsafe { BeginPaint(hwnd, &mut ps) };
            let mut canvas = GdiCanvas::new(hdc);
            with_session(|session| session.paint(&mut canvas));
            unsafe {
                let _ = EndPaint(hwnd, &ps);
            }
            LRESULT(0)
        }

        // Painting covers the whole client area.
        WM_ERASEBKGND => LRESULT(1),

        WM_SIZE => {
            let width = i32::from(low_word(lparam.0));
            let height = i32::from(high_word(lparam.0));
            dispatch(hwnd, InputEvent::Resize { width, height });
            LRESULT(0)
        }

        WM_GETMINMAXINFO => {
            // SAFETY: lparam points at the MINMAXINFO the system is filling in.
            let info = unsafe { &mut *(lparam.0 as *mut MINMAXINFO) };
            info.ptMinTrackSize =
                POINT { x: to_i32(MIN_WINDOW_WIDTH), y: to_i32(MIN_WINDOW_HEIGHT) };
            LRESULT(0)
        }

        WM_LBUTTONDOWN | WM_RBUTTONDOWN => {
            let button = if msg == WM_LBUTTONDOWN { Button::Primary } else { Button::Secondary };
            let at = Point::new(
                i32::from(low_word(lparam.0) as i16),
                i32::from(high_word(lparam.0) as i16),
            );
            dispatch(hwnd, InputEvent::Press { button, at });
            LRESULT(0)
        }

        WM_MOUSEWHEEL => {
            let delta = i32::from(high_word(wparam.0 as isize) as i16);
            dispatch(hwnd, InputEvent::Wheel { delta });
            LRESULT(0)
        }

        WM_KEYDOWN => {
            if let Some(key) = translate_key(wparam.0 as u16) {
                let modifiers = Modifiers { ctrl: is_down(VK_CONTROL.0), shift: is_down(VK_SHIFT.0) };
                dispatch(hwnd, InputEvent::Key { key, modifiers });
            }
            LRESULT(0)
        }

        WM_DESTROY => {
            close(hwnd);
            unsafe { PostQuitMessage(0) };
            LRESULT(0)
        }

        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

fn dispatch(hwnd: HWND, event: InputEvent) {
    let Some(reaction) = with_session(|session| session.handle(event)) else {
        return;
    };
    apply(hwnd, reaction);
}

/// Act on a reaction once the session borrow has ended, since
/// `DestroyWindow` re-enters the window procedure.
fn apply(hwnd: HWND, reaction: Reaction) {
    if reaction.repaint {
        unsafe {
            let _ = InvalidateRect(Some(hwnd), None, false);
        }
    }
    if reaction.launch_editor {
        debug!("Launching {}", EDITOR);
        if let Err(e) = std::process::Command::new(EDITOR).spawn() {
            warn!("Failed to launch {}: {}", EDITOR, e);
        }
    }
    if reaction.quit {
        if let Err(e) = unsafe { DestroyWindow(hwnd) } {
            warn!("DestroyWindow failed: {}", e);
        }
    }
}

/// Save settings with the final outer window size and release the board
fn close(hwnd: HWND) {
    let Some(mut state) = STATE.with(|state| state.borrow_mut().take()) else {
        return;
    };

    let mut rect = RECT::default();
    let window = match unsafe { GetWindowRect(hwnd, &mut rect) } {
        Ok(()) => WindowSize {
            width: u32::try_from(rect.right - rect.left).unwrap_or(MIN_WINDOW_WIDTH),
            height: u32::try_from(rect.bottom - rect.top).unwrap_or(MIN_WINDOW_HEIGHT),
        },
        Err(e) => {
            warn!("GetWindowRect failed: {}", e);
            state.session.settings().window
        }
    };

    if let Err(e) = state.session.shutdown(window, &state.settings_path) {
        alert::report(Severity::Error, "Settings not saved", &e);
    }
}

fn translate_key(code: u16) -> Option<Key> {
    match code {
        c if c == VK_ESCAPE.0 => Some(Key::Escape),
        c if c == VK_RETURN.0 => Some(Key::Enter),
        c @ 0x41..=0x5A => char::from_u32(u32::from(c)).map(Key::Letter),
        _ => None,
    }
}

fn is_down(key: u16) -> bool {
    unsafe { GetKeyState(i32::from(key)) } < 0
}

fn low_word(value: isize) -> u16 {
    (value & 0xFFFF) as u16
}

fn high_word(value: isize) -> u16 {
    ((value >> 16) & 0xFFFF) as u16
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
