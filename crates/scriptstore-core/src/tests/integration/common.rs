#![cfg(test)]

use std::path::Path;

use tempfile::{tempdir, TempDir};

use crate::storage::StorageManager;
use crate::value::{ScriptTable, ScriptValue};

/// A manager over a fresh temporary data directory. Keep the `TempDir`
/// alive for as long as the manager is used.
pub fn setup_test_environment() -> (TempDir, StorageManager) {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let manager = StorageManager::new(temp_dir.path());
    (temp_dir, manager)
}

/// A second manager over the same directory, standing in for a restart.
pub fn reopen(data_dir: &Path) -> StorageManager {
    StorageManager::new(data_dir)
}

/// One value of each scalar shape, keyed by what it holds.
pub fn scalar_samples() -> Vec<(&'static str, ScriptValue)> {
    vec![
        ("text", ScriptValue::from("hello world")),
        ("integer", ScriptValue::from(-42)),
        ("float", ScriptValue::from(0.25)),
        ("flag", ScriptValue::from(true)),
    ]
}

pub fn settings_table() -> ScriptTable {
    let mut audio = ScriptTable::new();
    audio.insert("volume", 10);
    audio.insert("muted", false);

    let mut settings = ScriptTable::new();
    settings.insert("audio", audio);
    settings.insert("recent", ScriptTable::from_sequence(["a.lua", "b.lua"]));
    settings
}
