//! Error types for the shared board, settings and window layers.
//!
//! Every fallible operation in the crate returns [`Result`], whose error is
//! [`GameError`]. None of these errors is fatal to a running instance: the
//! caller reports them through an alert and continues in a degraded mode.
//!
//! ## Error Categories
//!
//! - **Shared memory**: the board segment could not be created or mapped
//! - **Settings**: the settings file could not be read, parsed or written
//! - **Arguments**: the grid size given on the command line was rejected
//! - **Windows API**: a native window or GDI call failed
//!
//! ```rust
//! use tictactoe::GameError;
//!
//! let error = GameError::shared_memory("CreateFileMappingW", std::io::Error::other("denied"));
//! assert!(error.is_degradable());
//! println!("{error}: {}", error.hint());
//! ```

use std::path::PathBuf;
use thiserror::Error;

#[cfg(windows)]
use windows_core as core;

/// Result type alias for board and settings operations.
pub type Result<T, E = GameError> = std::result::Result<T, E>;

/// Main error type.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GameError {
    #[error("Shared memory operation failed: {operation}")]
    SharedMemory {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Settings file error: {path}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Settings file {path} could not be parsed: {details}")]
    SettingsParse { path: PathBuf, details: String },

    #[error("Invalid grid size argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("{feature} is only available on {required_platform}")]
    UnsupportedPlatform { feature: String, required_platform: String },

    #[error("Windows API error: {operation}")]
    #[cfg(windows)]
    WindowsApi {
        operation: String,
        #[source]
        source: core::Error,
    },
}

impl GameError {
    /// Returns whether the instance can keep running after this error.
    ///
    /// Only a failure to bring up the window itself ends the process.
    pub fn is_degradable(&self) -> bool {
        match self {
            GameError::SharedMemory { .. } => true,
            GameError::SettingsIo { .. } => true,
            GameError::SettingsParse { .. } => true,
            GameError::InvalidArgument { .. } => true,
            GameError::UnsupportedPlatform { .. } => false,
            #[cfg(windows)]
            GameError::WindowsApi { .. } => false,
        }
    }

    /// Short explanation of what the instance does next, shown in alerts.
    pub fn hint(&self) -> &'static str {
        match self {
            GameError::SharedMemory { .. } => {
                "The board will not be shared with other windows for this session."
            }
            GameError::SettingsIo { .. } => {
                "Check that the settings file is a readable and writable text file."
            }
            GameError::SettingsParse { .. } => {
                "Default settings are used; the file is rewritten when the game closes."
            }
            GameError::InvalidArgument { .. } => {
                "The grid size from the settings file (or 3 by default) is used instead."
            }
            GameError::UnsupportedPlatform { .. } => "Run the game on a supported platform.",
            #[cfg(windows)]
            GameError::WindowsApi { .. } => "The window could not be created.",
        }
    }

    /// Helper constructor for shared memory failures.
    pub fn shared_memory(operation: impl Into<String>, source: std::io::Error) -> Self {
        GameError::SharedMemory { operation: operation.into(), source }
    }

    /// Helper constructor for settings I/O failures with path context.
    pub fn settings_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GameError::SettingsIo { path: path.into(), source }
    }

    /// Helper constructor for settings documents that are not valid YAML.
    pub fn settings_parse(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        GameError::SettingsParse { path: path.into(), details: details.into() }
    }

    /// Helper constructor for rejected command line arguments.
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        GameError::InvalidArgument { reason: reason.into() }
    }

    /// Helper constructor for Windows API errors.
    #[cfg(windows)]
    pub fn windows_api_error(operation: impl Into<String>, source: core::Error) -> Self {
        GameError::WindowsApi { operation: operation.into(), source }
    }

    /// Helper constructor for unsupported platform errors.
    pub fn unsupported_platform(
        feature: impl Into<String>,
        required_platform: impl Into<String>,
    ) -> Self {
        GameError::UnsupportedPlatform {
            feature: feature.into(),
            required_platform: required_platform.into(),
        }
    }
}

#[cfg(windows)]
impl From<core::Error> for GameError {
    fn from(err: core::Error) -> Self {
        GameError::WindowsApi { operation: "Unknown Windows operation".to_string(), source: err }
    }
}
