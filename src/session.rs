//! Per-instance application state and input handling
//!
//! A [`Session`] owns everything one game window needs: its settings, the
//! shared board store, the local mirror, the peer notifier and the random
//! generator used for background colours. The window layer translates native
//! events into [`InputEvent`]s and acts on the returned [`Reaction`].
//!
//! ```rust
//! use tictactoe::config::Settings;
//! use tictactoe::layout::Point;
//! use tictactoe::notify::Detached;
//! use tictactoe::session::{Button, InputEvent, Session};
//! use tictactoe::shared::BoardStore;
//! use tictactoe::types::{Cell, CellPos};
//!
//! let mut session = Session::new(Settings::default(), BoardStore::detached(), Box::new(Detached));
//! session.handle(InputEvent::Resize { width: 300, height: 300 });
//!
//! let reaction = session.handle(InputEvent::Press { button: Button::Secondary, at: Point::new(150, 150) });
//! assert!(reaction.repaint);
//! assert_eq!(session.board().get(CellPos::new(1, 1).unwrap()), Cell::Cross);
//! ```

use crate::Result;
use crate::board::Board;
use crate::config::{Settings, WindowSize};
use crate::layout::{Layout, Point};
use crate::notify::Notifier;
use crate::render::{self, Canvas, Palette};
use crate::shared::BoardStore;
use crate::types::{Cell, CellPos, Rgb, WheelDirection};
use rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::path::Path;
use tracing::{debug, info};

/// Pointer button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Places a nought
    Primary,
    /// Places a cross
    Secondary,
}

impl Button {
    fn mark(self) -> Cell {
        match self {
            Button::Primary => Cell::Nought,
            Button::Secondary => Cell::Cross,
        }
    }
}

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    /// Letter key, upper case
    Letter(char),
}

/// Modifier keys held during a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
}

/// Input delivered by the window layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Press { button: Button, at: Point },
    Key { key: Key, modifiers: Modifiers },
    Wheel { delta: i32 },
    /// Client area resized
    Resize { width: i32, height: i32 },
    /// Another instance changed the shared board
    PeerUpdate,
}

/// What the window layer should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reaction {
    pub repaint: bool,
    pub quit: bool,
    pub launch_editor: bool,
}

impl Reaction {
    const REPAINT: Reaction = Reaction { repaint: true, quit: false, launch_editor: false };
    const QUIT: Reaction = Reaction { repaint: false, quit: true, launch_editor: false };
    const EDITOR: Reaction = Reaction { repaint: false, quit: false, launch_editor: true };
}

/// State of one game window
pub struct Session {
    settings: Settings,
    store: BoardStore,
    board: Board,
    notifier: Box<dyn Notifier>,
    layout: Layout,
    rng: Xoshiro256PlusPlus,
}

impl Session {
    /// Build a session and load the current shared board into the mirror.
    pub fn new(settings: Settings, store: BoardStore, notifier: Box<dyn Notifier>) -> Self {
        let size = settings.grid_size;
        let mut board = Board::new(size);
        board.refresh_from(&store);

        Self {
            layout: Layout::new(size, 0, 0),
            board,
            settings,
            store,
            notifier,
            rng: Xoshiro256PlusPlus::from_os_rng(),
        }
    }

    /// Replace the notifier, e.g. once the native window handle exists
    pub fn set_notifier(&mut self, notifier: Box<dyn Notifier>) {
        self.notifier = notifier;
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn store(&self) -> &BoardStore {
        &self.store
    }

    /// Apply one input event
    pub fn handle(&mut self, event: InputEvent) -> Reaction {
        match event {
            InputEvent::Press { button, at } => {
                let pos = self.layout.hit_test(at);
                self.place(pos, button.mark());
                Reaction::REPAINT
            }
            InputEvent::Key { key: Key::Escape, .. } => Reaction::QUIT,
            InputEvent::Key { key: Key::Letter('Q'), modifiers } if modifiers.ctrl => {
                Reaction::QUIT
            }
            InputEvent::Key { key: Key::Letter('C'), modifiers } if modifiers.shift => {
                Reaction::EDITOR
            }
            InputEvent::Key { key: Key::Enter, .. } => {
                self.settings.background = Rgb::random(&mut self.rng);
                debug!(color = ?self.settings.background, "New background colour");
                Reaction::REPAINT
            }
            InputEvent::Key { .. } => Reaction::default(),
            InputEvent::Wheel { delta } => {
                self.settings.lines = self.settings.lines.shifted(WheelDirection::from_delta(delta));
                Reaction::REPAINT
            }
            InputEvent::Resize { width, height } => {
                self.layout = Layout::new(self.settings.grid_size, width, height);
                Reaction::REPAINT
            }
            InputEvent::PeerUpdate => {
                self.board.refresh_from(&self.store);
                Reaction::REPAINT
            }
        }
    }

    /// Check the notifier for updates from other sessions
    pub fn poll_peers(&mut self) -> Reaction {
        if self.notifier.pending() > 0 {
            self.handle(InputEvent::PeerUpdate)
        } else {
            Reaction::default()
        }
    }

    /// Draw the current mirror
    pub fn paint(&self, canvas: &mut impl Canvas) {
        let palette = Palette::new(self.settings.background, self.settings.lines);
        render::paint(canvas, &self.layout, &self.board, &palette);
    }

    /// Save settings (with the final window size) and release the board.
    ///
    /// The store is released even when saving fails.
    pub fn shutdown(&mut self, window: WindowSize, settings_path: impl AsRef<Path>) -> Result<()> {
        self.settings.window = window;
        let saved = self.settings.save(settings_path);
        self.store.release();
        info!("Session closed");
        saved
    }

    fn place(&mut self, pos: CellPos, cell: Cell) {
        debug!(%pos, %cell, "Placing mark");
        if self.store.is_attached() {
            self.store.write(pos, cell);
            self.board.refresh_from(&self.store);
            self.notifier.notify_peers();
        } else {
            self.board.set(pos, cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{Detached, LocalBus};
    use crate::test_utils::{scratch_dir, unique_segment_name};
    use crate::types::GridSize;

    fn pos(x: usize, y: usize) -> CellPos {
        CellPos::new(x, y).unwrap()
    }

    fn detached_session() -> Session {
        let mut session = Session::new(Settings::default(), BoardStore::detached(), Box::new(Detached));
        session.handle(InputEvent::Resize { width: 300, height: 300 });
        session
    }

    fn press(button: Button, x: i32, y: i32) -> InputEvent {
        InputEvent::Press { button, at: Point::new(x, y) }
    }

    fn key(key: Key, ctrl: bool, shift: bool) -> InputEvent {
        InputEvent::Key { key, modifiers: Modifiers { ctrl, shift } }
    }

    #[test]
    fn buttons_place_their_marks() {
        let mut session = detached_session();
        session.handle(press(Button::Primary, 10, 10));
        session.handle(press(Button::Secondary, 250, 250));

        assert_eq!(session.board().get(pos(0, 0)), Cell::Nought);
        assert_eq!(session.board().get(pos(2, 2)), Cell::Cross);
    }

    #[test]
    fn marks_can_be_overwritten() {
        let mut session = detached_session();
        session.handle(press(Button::Primary, 10, 10));
        session.handle(press(Button::Secondary, 10, 10));
        assert_eq!(session.board().get(pos(0, 0)), Cell::Cross);
    }

    #[test]
    fn quit_bindings() {
        let mut session = detached_session();
        assert!(session.handle(key(Key::Escape, false, false)).quit);
        assert!(session.handle(key(Key::Letter('Q'), true, false)).quit);
        assert!(!session.handle(key(Key::Letter('Q'), false, false)).quit);
    }

    #[test]
    fn shift_c_requests_the_editor() {
        let mut session = detached_session();
        assert!(session.handle(key(Key::Letter('C'), false, true)).launch_editor);
        assert_eq!(session.handle(key(Key::Letter('C'), false, false)), Reaction::default());
    }

    #[test]
    fn wheel_shifts_line_colour() {
        let mut session = detached_session();
        let before = session.settings().lines;
        let reaction = session.handle(InputEvent::Wheel { delta: 120 });
        assert!(reaction.repaint);
        assert_eq!(session.settings().lines, before.shifted(WheelDirection::Up));
    }

    #[test]
    fn enter_changes_background() {
        let mut session = detached_session();
        let before = session.settings().background;
        let changed = (0..8).any(|_| {
            session.handle(key(Key::Enter, false, false));
            session.settings().background != before
        });
        assert!(changed);
    }

    #[test]
    fn sessions_seed_backgrounds_independently() {
        let backgrounds = |session: &mut Session| -> Vec<Rgb> {
            (0..4)
                .map(|_| {
                    session.handle(key(Key::Enter, false, false));
                    session.settings().background
                })
                .collect()
        };
        let first = backgrounds(&mut detached_session());
        let second = backgrounds(&mut detached_session());
        assert_ne!(first, second);
    }

    #[test]
    fn sibling_session_mirrors_writes_after_notification() {
        let name = unique_segment_name("sibling");
        let bus = LocalBus::new();
        let settings = Settings::default();

        let mut writer = Session::new(
            settings.clone(),
            BoardStore::acquire(&name).expect("acquire"),
            Box::new(bus.join()),
        );
        let mut reader = Session::new(
            settings,
            BoardStore::acquire(&name).expect("acquire"),
            Box::new(bus.join()),
        );
        writer.handle(InputEvent::Resize { width: 300, height: 300 });

        writer.handle(press(Button::Secondary, 250, 250));
        assert_eq!(reader.board().get(pos(2, 2)), Cell::Empty, "no refresh before notification");

        assert!(reader.poll_peers().repaint);
        assert_eq!(reader.board().get(pos(2, 2)), Cell::Cross);
        assert_eq!(writer.poll_peers(), Reaction::default(), "writer does not notify itself");
    }

    #[test]
    fn sessions_with_different_grid_sizes_share_cells() {
        let name = unique_segment_name("sizes");
        let bus = LocalBus::new();
        let small = Settings { grid_size: GridSize::new(3).unwrap(), ..Settings::default() };
        let large = Settings { grid_size: GridSize::new(10).unwrap(), ..Settings::default() };

        let mut big = Session::new(large, BoardStore::acquire(&name).unwrap(), Box::new(bus.join()));
        let mut little =
            Session::new(small, BoardStore::acquire(&name).unwrap(), Box::new(bus.join()));
        big.handle(InputEvent::Resize { width: 1000, height: 1000 });

        big.handle(press(Button::Primary, 50, 150)); // (0, 1)
        big.handle(press(Button::Primary, 950, 950)); // (9, 9), invisible to the 3x3 board
        little.poll_peers();

        assert_eq!(little.board().get(pos(0, 1)), Cell::Nought);
        assert_eq!(little.board().marks().count(), 1);
    }

    #[test]
    fn shutdown_saves_window_size_and_releases_store() {
        let path = scratch_dir("shutdown").join("settings.yaml");
        let store = BoardStore::acquire(&unique_segment_name("shutdown")).expect("acquire");
        let mut session = Session::new(Settings::default(), store, Box::new(Detached));

        let window = WindowSize { width: 640, height: 480 };
        session.shutdown(window, &path).expect("shutdown");

        assert!(!session.store().is_attached());
        assert_eq!(Settings::load(&path).expect("reload").window, window);
    }
}
