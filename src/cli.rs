//! Command line handling
//!
//! The game takes at most one argument: a positive integer overriding the
//! grid size for this session. Anything else is rejected with an error that
//! the caller shows as a warning before falling back to the configured size.

use crate::config::Settings;
use crate::types::{GridSize, MAX_GRID_SIZE};
use crate::{GameError, Result};
use clap::Parser;
use std::ffi::OsString;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "tictactoe", about = "Tic-tac-toe shared between running instances")]
#[command(disable_help_flag = true)]
struct Args {
    /// Grid size for this session, 1 to 10
    #[arg(value_parser = parse_grid_size)]
    grid_size: Option<GridSize>,
}

/// Parse the arguments that follow the program name.
///
/// Returns `Ok(None)` when no override was given.
pub fn grid_size_override<I, T>(args: I) -> Result<Option<GridSize>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let argv = std::iter::once(OsString::from("tictactoe")).chain(args.into_iter().map(Into::into));
    let args = Args::try_parse_from(argv)
        .map_err(|e| GameError::invalid_argument(e.to_string().trim_end()))?;
    Ok(args.grid_size)
}

/// Apply a grid size override to `settings`.
///
/// A rejected argument leaves `settings` untouched and is returned for the
/// caller to report.
pub fn apply_override<I, T>(settings: &mut Settings, args: I) -> Option<GameError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    match grid_size_override(args) {
        Ok(Some(size)) => {
            debug!(from = %settings.grid_size, to = %size, "Grid size overridden");
            settings.grid_size = size;
            None
        }
        Ok(None) => None,
        Err(e) => Some(e),
    }
}

/// Digits only, so signs and decimal points are rejected like any other text
fn parse_grid_size(arg: &str) -> std::result::Result<GridSize, String> {
    if arg.is_empty() || !arg.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("'{arg}' is not a positive integer"));
    }

    // All digits: the only parse failure left is overflow, which is too large anyway.
    let side = arg.parse::<u64>().unwrap_or(u64::MAX);
    if side == 0 {
        return Err("the grid size cannot be 0".to_string());
    }

    GridSize::new(side).ok_or_else(|| format!("the largest grid size is {MAX_GRID_SIZE}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Option<GridSize>> {
        grid_size_override(args.iter().copied())
    }

    #[test]
    fn no_argument_means_no_override() {
        assert!(matches!(parse(&[]), Ok(None)));
    }

    #[test]
    fn valid_sizes_are_accepted() {
        assert_eq!(parse(&["1"]).unwrap().map(GridSize::get), Some(1));
        assert_eq!(parse(&["10"]).unwrap().map(GridSize::get), Some(10));
        assert_eq!(parse(&["007"]).unwrap().map(GridSize::get), Some(7));
    }

    #[test]
    fn rejected_arguments() {
        let cases: &[&[&str]] = &[
            &["0"],
            &["11"],
            &["abc"],
            &["-3"],
            &["+3"],
            &["3.0"],
            &[""],
            &["99999999999999999999999"],
            &["3", "4"],
            &["--help"],
        ];
        for args in cases {
            let result = parse(args);
            assert!(
                matches!(result, Err(GameError::InvalidArgument { .. })),
                "{args:?} gave {result:?}"
            );
        }
    }

    #[test]
    fn zero_has_its_own_message() {
        let err = parse(&["0"]).unwrap_err();
        assert!(err.to_string().contains("cannot be 0"), "{err}");
    }

    #[test]
    fn override_replaces_configured_size() {
        let mut settings = Settings { grid_size: GridSize::new(7).unwrap(), ..Settings::default() };
        assert!(apply_override(&mut settings, ["4"]).is_none());
        assert_eq!(settings.grid_size, GridSize::new(4).unwrap());
    }

    #[test]
    fn rejected_override_keeps_configured_size() {
        let configured = Settings::from_yaml("gridSize: 7").unwrap();

        for arg in ["0", "11", "abc"] {
            let mut settings = configured.clone();
            let warning = apply_override(&mut settings, [arg]);
            assert!(matches!(warning, Some(GameError::InvalidArgument { .. })), "{arg}");
            assert_eq!(settings, configured, "{arg} changed the settings");
        }

        let mut settings = configured.clone();
        assert!(apply_override(&mut settings, Vec::<String>::new()).is_none());
        assert_eq!(settings.grid_size, GridSize::new(7).unwrap());
    }
}
