//! Event payload files for subprocess tests.

use std::path::PathBuf;

use serde_json::Value;
use tempfile::TempDir;

/// Creates a temporary directory for event payload files.
///
/// # Panics
///
/// Panics if the temporary directory cannot be created.
pub fn create_temp_dir() -> TempDir {
    TempDir::new().unwrap_or_else(|error| panic!("failed to create temporary directory: {error}"))
}

/// Writes `payload` as `event.json` inside `dir` and returns its path.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_event(dir: &TempDir, payload: &Value) -> PathBuf {
    let event_path = dir.path().join("event.json");
    std::fs::write(&event_path, payload.to_string())
        .unwrap_or_else(|error| panic!("failed to write event payload: {error}"));
    event_path
}
