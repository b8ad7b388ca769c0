//! Settings file handling
//!
//! Settings are read once at startup and written back when the game closes.
//! The file is YAML (`settings.yaml` in the working directory); because YAML
//! accepts JSON documents, a JSON settings file with the same keys loads too.
//!
//! ```yaml
//! gridSize: 3
//! winSize: [320, 240]
//! backColor: [45, 73, 255]
//! lineColor: [255, 48, 55]
//! ```
//!
//! Each field is validated on its own. A missing or invalid field keeps its
//! default without affecting the others. Only a document that cannot be
//! parsed at all is reported as an error.

use crate::types::{GridSize, Rgb};
use crate::{GameError, Result};
use serde::Serialize;
use serde_yaml_ng::Value;
use std::path::Path;
use tracing::{debug, info};

/// Settings file name, relative to the working directory
pub const SETTINGS_FILE: &str = "settings.yaml";

/// Smallest window width the user can drag the window to
pub const MIN_WINDOW_WIDTH: u32 = 200;
/// Smallest window height the user can drag the window to
pub const MIN_WINDOW_HEIGHT: u32 = 200;

/// Outer window size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    pub const DEFAULT: WindowSize = WindowSize { width: 320, height: 240 };
}

/// Scalar settings of one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub grid_size: GridSize,
    pub window: WindowSize,
    pub background: Rgb,
    pub lines: Rgb,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_size: GridSize::default(),
            window: WindowSize::DEFAULT,
            background: Rgb::new(45, 73, 255),
            lines: Rgb::new(255, 48, 55),
        }
    }
}

/// On-disk layout written by [`Settings::save`]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SettingsDocument {
    grid_size: u8,
    win_size: [u32; 2],
    back_color: [u8; 3],
    line_color: [u8; 3],
}

impl Settings {
    /// Load settings from `path`.
    ///
    /// A missing file yields the defaults without error. An unreadable or
    /// unparseable file is an error; callers fall back to the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(GameError::settings_io(path, e)),
        };

        let settings = Self::from_yaml(&text)
            .map_err(|details| GameError::settings_parse(path, details))?;
        info!(
            grid = %settings.grid_size,
            width = settings.window.width,
            height = settings.window.height,
            "Loaded settings from {}",
            path.display()
        );
        Ok(settings)
    }

    /// Parse a settings document, validating each field independently.
    ///
    /// Fails only when the text is not YAML or is not a mapping.
    pub fn from_yaml(text: &str) -> std::result::Result<Self, String> {
        let document: Value = serde_yaml_ng::from_str(text).map_err(|e| e.to_string())?;
        if !document.is_mapping() {
            return Err("settings document is not a mapping".to_string());
        }

        let mut settings = Self::default();

        match document.get("gridSize").map(parse_grid_size) {
            Some(Some(size)) => settings.grid_size = size,
            Some(None) => debug!("Ignoring invalid gridSize"),
            None => {}
        }
        match document.get("winSize").map(parse_window_size) {
            Some(Some(window)) => settings.window = window,
            Some(None) => debug!("Ignoring invalid winSize"),
            None => {}
        }
        match document.get("backColor").map(parse_color) {
            Some(Some(color)) => settings.background = color,
            Some(None) => debug!("Ignoring invalid backColor"),
            None => {}
        }
        match document.get("lineColor").map(parse_color) {
            Some(Some(color)) => settings.lines = color,
            Some(None) => debug!("Ignoring invalid lineColor"),
            None => {}
        }

        Ok(settings)
    }

    /// Serialize to the on-disk layout
    pub fn to_yaml(&self) -> Result<String> {
        let document = SettingsDocument {
            grid_size: self.grid_size.into(),
            win_size: [self.window.width, self.window.height],
            back_color: self.background.channels(),
            line_color: self.lines.channels(),
        };
        serde_yaml_ng::to_string(&document)
            .map_err(|e| GameError::settings_parse(SETTINGS_FILE, e.to_string()))
    }

    /// Overwrite `path` with these settings
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = self.to_yaml()?;
        std::fs::write(path, text).map_err(|e| GameError::settings_io(path, e))?;
        debug!("Saved settings to {}", path.display());
        Ok(())
    }
}

fn parse_grid_size(value: &Value) -> Option<GridSize> {
    value.as_u64().and_then(GridSize::new)
}

fn parse_window_size(value: &Value) -> Option<WindowSize> {
    let [width, height] = value.as_sequence()?.as_slice() else { return None };
    let width = u32::try_from(width.as_u64()?).ok()?;
    let height = u32::try_from(height.as_u64()?).ok()?;
    (width > MIN_WINDOW_WIDTH && height > MIN_WINDOW_HEIGHT).then_some(WindowSize { width, height })
}

fn parse_color(value: &Value) -> Option<Rgb> {
    let [r, g, b] = value.as_sequence()?.as_slice() else { return None };
    let channel = |v: &Value| v.as_u64().and_then(|c| u8::try_from(c).ok());
    Some(Rgb::new(channel(r)?, channel(g)?, channel(b)?))
}
