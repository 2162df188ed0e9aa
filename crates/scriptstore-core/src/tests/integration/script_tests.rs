#![cfg(test)]

use crate::script::{ScriptObject, StorageBinding};
use crate::value::{ScriptTable, ScriptValue};

use super::common::{reopen, setup_test_environment};

#[test]
fn test_script_session_through_manager() {
    let (temp_dir, mut manager) = setup_test_environment();

    {
        let handle = manager.storage_object("scores.json").unwrap();
        let mut scores = StorageBinding::new(handle.as_mut());
        scores
            .call("setValue", &[ScriptValue::from("alice"), ScriptValue::from(12)])
            .unwrap();
        scores
            .call("setDefaultValue", &[ScriptValue::from("bob"), ScriptValue::from(0)])
            .unwrap();
    }
    manager.save_all();

    let mut restarted = reopen(temp_dir.path());
    let handle = restarted.storage_object("scores.json").unwrap();
    let mut scores = StorageBinding::new(handle.as_mut());
    assert_eq!(
        scores.call("getValue", &[ScriptValue::from("alice")]).unwrap(),
        ScriptValue::Integer(12)
    );
    assert_eq!(
        scores.call("getValue", &[ScriptValue::from("bob")]).unwrap(),
        ScriptValue::Integer(0)
    );
}

#[cfg(feature = "yaml-config")]
#[test]
fn test_config_wrapper_session() {
    use crate::script::ConfigBinding;

    let (temp_dir, mut manager) = setup_test_environment();
    {
        let mut config = ConfigBinding::new(manager.config());
        config.call("setAutosave", &[ScriptValue::from(true)]).unwrap();
        config
            .call("setDefault", &[ScriptValue::from("lang"), ScriptValue::from("en")])
            .unwrap();

        let limits: ScriptTable = [("max", 5), ("min", 1)].into_iter().collect();
        config
            .call("mapTableToKey", &[ScriptValue::from("limits"), ScriptValue::Table(limits)])
            .unwrap();
        config.call("clear", &[ScriptValue::from("limits.min")]).unwrap();
    }
    // Autosave and clear already flushed; no save_all here.
    drop(manager);

    let mut restarted = reopen(temp_dir.path());
    let config = restarted.config();
    assert_eq!(config.get("lang"), ScriptValue::from("en"));
    assert_eq!(config.get("limits.max"), ScriptValue::Integer(5));
    assert_eq!(config.get("limits.min"), ScriptValue::Nil);
}
