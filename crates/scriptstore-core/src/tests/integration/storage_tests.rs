#![cfg(test)]

use std::fs;

use crate::storage::{StorageKind, StorageManager};
use crate::value::ScriptValue;

use super::common::{reopen, scalar_samples, settings_table, setup_test_environment};

fn round_trip(file: &str, key_prefix: &str) {
    let (temp_dir, mut manager) = setup_test_environment();

    let store = manager.storage_object(file).expect("Failed to open store");
    for (key, value) in scalar_samples() {
        store
            .set(&format!("{key_prefix}{key}"), &value)
            .expect("Failed to set value");
    }
    store.set(&format!("{key_prefix}settings"), &ScriptValue::Table(settings_table()))
        .expect("Failed to set table");
    store.save();

    let mut restarted = reopen(temp_dir.path());
    let store = restarted.storage_object(file).expect("Failed to reopen store");
    for (key, value) in scalar_samples() {
        assert_eq!(store.get(&format!("{key_prefix}{key}")), value, "value for '{key}' changed on reload");
    }
    assert_eq!(
        store.get(&format!("{key_prefix}settings")),
        ScriptValue::Table(settings_table())
    );
}

#[test]
fn test_json_values_survive_reload() {
    round_trip("state/session.json", "");
}

#[cfg(feature = "yaml-config")]
#[test]
fn test_yaml_values_survive_reload() {
    round_trip("state/session.yml", "profile.");
}

#[test]
fn test_unsaved_changes_are_lost_on_reload() {
    let (temp_dir, mut manager) = setup_test_environment();
    let store = manager.storage_object("volatile.json").expect("Failed to open store");
    store.set("kept", &ScriptValue::from(1)).unwrap();
    store.save();
    store.set("lost", &ScriptValue::from(2)).unwrap();
    drop(manager);

    let mut restarted = reopen(temp_dir.path());
    let store = restarted.storage_object("volatile.json").unwrap();
    assert!(store.exists("kept"));
    assert!(!store.exists("lost"));
}

#[test]
fn test_leading_separator_lands_under_data_dir() {
    let (temp_dir, mut manager) = setup_test_environment();
    let store = manager.storage_object("/nested/dir/data.json").unwrap();

    assert_eq!(store.path(), temp_dir.path().join("nested/dir/data.json"));
    assert!(temp_dir.path().join("nested/dir/data.json").is_file());
}

#[test]
fn test_file_replaced_between_sessions_is_read_fresh() {
    let (temp_dir, _) = setup_test_environment();
    fs::write(temp_dir.path().join("seeded.json"), r#"{"greeting": "hi", "count": 3}"#).unwrap();

    let mut manager = StorageManager::new(temp_dir.path());
    let store = manager.storage_object("seeded.json").unwrap();
    assert_eq!(store.kind(), StorageKind::Json);
    assert_eq!(store.get("greeting"), ScriptValue::from("hi"));
    assert_eq!(store.get("count"), ScriptValue::Integer(3));
}

#[cfg(feature = "yaml-config")]
#[test]
fn test_hand_written_yaml_is_readable() {
    let (temp_dir, _) = setup_test_environment();
    fs::write(
        temp_dir.path().join("config.yml"),
        "server:\n  host: localhost\n  port: 8080\nmotd: >\n  folded\n  text\n",
    )
    .unwrap();

    let mut manager = StorageManager::new(temp_dir.path());
    let config = manager.config();
    assert_eq!(config.get("server.host"), ScriptValue::from("localhost"));
    assert_eq!(config.get("server.port"), ScriptValue::Integer(8080));
    assert_eq!(config.get("motd"), ScriptValue::from("folded text\n"));
}
