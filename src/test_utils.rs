//! Test utilities for isolated shared segments and scratch files
//!
//! Tests run in parallel, and segments and settings files are visible to the
//! whole machine, so every test gets names unique to the process and call.

#![cfg(any(test, feature = "benchmark"))]

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_suffix() -> String {
    format!("{}-{}", std::process::id(), COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// Segment name that no other test (or running game) uses.
///
/// Kept short: some platforms cap shared memory names at 31 bytes.
pub fn unique_segment_name(tag: &str) -> String {
    let tag: String = tag.chars().take(8).collect();
    if cfg!(windows) {
        format!("Local\\ttt-{tag}-{}", next_suffix())
    } else {
        format!("/ttt-{tag}-{}", next_suffix())
    }
}

/// Fresh, empty directory under the system temp directory
pub fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tictactoe-{}-{tag}", next_suffix()));
    if dir.exists() {
        let _ = std::fs::remove_dir_all(&dir);
    }
    if let Err(e) = std::fs::create_dir_all(&dir) {
        panic!("Failed to create scratch directory {}: {}", dir.display(), e);
    }
    dir
}
