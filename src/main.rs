//! Game entry point
//!
//! Usage: `tictactoe [N]` where `N` (1..=10) overrides the grid size from
//! `settings.yaml` for this run.

use anyhow::Context;
use std::path::PathBuf;
use tictactoe::alert::{self, Severity};
use tictactoe::config::{SETTINGS_FILE, Settings};
use tictactoe::notify::Detached;
use tictactoe::{BoardStore, Session, cli, gui};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings_path = PathBuf::from(SETTINGS_FILE);
    let mut settings = Settings::load(&settings_path).unwrap_or_else(|e| {
        alert::report(Severity::Warning, "Settings", &e);
        Settings::default()
    });

    if let Some(e) = cli::apply_override(&mut settings, std::env::args_os().skip(1)) {
        alert::report(Severity::Warning, "Grid size", &e);
    }

    let store = BoardStore::acquire_default().unwrap_or_else(|e| {
        alert::report(Severity::Error, "Shared memory", &e);
        BoardStore::detached()
    });
    info!(
        grid = %settings.grid_size,
        shared = store.is_attached(),
        first = store.is_first_instance(),
        "Starting"
    );

    let session = Session::new(settings, store, Box::new(Detached));
    gui::run(session, settings_path).context("Game window failed")?;
    Ok(())
}
