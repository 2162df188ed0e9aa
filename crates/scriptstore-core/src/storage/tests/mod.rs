use std::path::Path;
use std::sync::Arc;

use crate::storage::{open_store, LocalStorageProvider, StorageKind, StorageSettings, StoreHandle};

mod config_tests;

fn open(dir: &Path, relative: &str, kind: StorageKind) -> StoreHandle {
    open_store(
        dir,
        relative,
        kind,
        Arc::new(LocalStorageProvider::new()),
        &StorageSettings::default(),
    )
}
