use std::fs;

use tempfile::tempdir;

use super::open;
use crate::storage::{ConfigFacade, StorageKind};
use crate::value::{ScriptTable, ScriptValue};

#[test]
fn test_autosave_on_persists_before_returning() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let mut config = ConfigFacade::new(open(temp_dir.path(), "config.json", StorageKind::Json));
    config.set_autosave(true);
    assert!(config.autosave());

    config.set("lang", &ScriptValue::from("en")).unwrap();

    let on_disk = fs::read_to_string(temp_dir.path().join("config.json")).unwrap();
    let on_disk: serde_json::Value = serde_json::from_str(&on_disk).unwrap();
    assert_eq!(on_disk["lang"], "en");
}

#[test]
fn test_autosave_off_defers_until_save() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("config.json");
    let mut config = ConfigFacade::new(open(temp_dir.path(), "config.json", StorageKind::Json));
    assert!(!config.autosave());

    let before = fs::read_to_string(&path).unwrap();
    config.set("lang", &ScriptValue::from("en")).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
    assert_eq!(config.get("lang"), ScriptValue::from("en"));

    config.save();
    assert!(fs::read_to_string(&path).unwrap().contains("\"lang\""));
}

#[test]
fn test_set_default_saves_only_when_written() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("config.json");
    let mut config = ConfigFacade::new(open(temp_dir.path(), "config.json", StorageKind::Json));
    config.set_autosave(true);

    assert!(config.set_default("volume", &ScriptValue::from(10)).unwrap());
    let after_first = fs::read_to_string(&path).unwrap();
    assert!(after_first.contains("\"volume\""));

    // Overwrite the file behind the facade's back; a no-op default must not
    // rewrite it.
    fs::write(&path, "{}").unwrap();
    assert!(!config.set_default("volume", &ScriptValue::from(20)).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    assert_eq!(config.get("volume"), ScriptValue::Integer(10));
}

#[test]
fn test_clear_always_saves() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("config.json");
    let mut config = ConfigFacade::new(open(temp_dir.path(), "config.json", StorageKind::Json));
    config.set("a", &ScriptValue::from(1)).unwrap();
    config.set("b", &ScriptValue::from(2)).unwrap();
    assert!(!config.autosave());

    assert!(config.clear("a"));
    let on_disk: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(on_disk.get("a").is_none());
    assert_eq!(on_disk["b"], 2);

    // Clearing an absent key still flushes.
    fs::remove_file(&path).unwrap();
    assert!(!config.clear("missing"));
    assert!(path.is_file());
}

#[test]
fn test_toggling_autosave_writes_nothing() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("config.json");
    let mut config = ConfigFacade::new(open(temp_dir.path(), "config.json", StorageKind::Json));
    config.set("pending", &ScriptValue::from(true)).unwrap();

    let before = fs::read_to_string(&path).unwrap();
    config.set_autosave(true);
    config.set_autosave(false);
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_failed_set_does_not_save() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("config.json");
    let mut config = ConfigFacade::new(open(temp_dir.path(), "config.json", StorageKind::Json));
    config.set_autosave(true);

    let before = fs::read_to_string(&path).unwrap();
    assert!(config.set("bad", &ScriptValue::from(f64::NAN)).is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
    assert!(!config.backend().exists("bad"));
}

#[cfg(feature = "yaml-config")]
#[test]
fn test_map_table_to_key_writes_nested_sections() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let mut config = ConfigFacade::new(open(temp_dir.path(), "config.yml", StorageKind::Yaml));

    let mut nested = ScriptTable::new();
    nested.insert("min", 1);
    let mut limits = ScriptTable::new();
    limits.insert("max", 5);
    limits.insert("nested", nested);

    config.map_table_to_key("limits", &limits).unwrap();
    assert_eq!(config.get("limits.max"), ScriptValue::Integer(5));
    assert_eq!(config.get("limits.nested.min"), ScriptValue::Integer(1));
    assert_eq!(config.get("limits"), ScriptValue::Table(limits));
}

#[cfg(feature = "yaml-config")]
#[test]
fn test_map_table_to_key_replaces_subtree_and_honors_autosave() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("config.yml");
    let mut config = ConfigFacade::new(open(temp_dir.path(), "config.yml", StorageKind::Yaml));
    config.set("limits.old", &ScriptValue::from("gone")).unwrap();
    config.set_autosave(true);

    let limits: ScriptTable = [("max", 5)].into_iter().collect();
    config.map_table_to_key("limits", &limits).unwrap();

    assert!(!config.backend().exists("limits.old"));
    let on_disk: serde_yaml::Value = serde_yaml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk["limits"]["max"], serde_yaml::Value::from(5));
    assert!(on_disk["limits"].get("old").is_none());
}

#[cfg(feature = "yaml-config")]
#[test]
fn test_into_inner_keeps_unsaved_state() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let mut config = ConfigFacade::new(open(temp_dir.path(), "config.yml", StorageKind::Yaml));
    config.set("a.b", &ScriptValue::from("c")).unwrap();

    let backend = config.into_inner();
    assert_eq!(backend.kind(), StorageKind::Yaml);
    assert_eq!(backend.get("a.b"), ScriptValue::from("c"));
}
