use log::debug;

use crate::storage::backend::{StorageBackend, StoreHandle};
use crate::storage::error::StorageError;
use crate::value::{table_to_host, ScriptTable, ScriptValue};

/// Convenience layer over one store, used for an owner's main
/// configuration.
///
/// With autosave on, `set`, a successful `set_default` and
/// `map_table_to_key` flush before returning. `clear` always flushes,
/// whatever the autosave setting.
#[derive(Debug)]
pub struct ConfigFacade {
    backend: StoreHandle,
    autosave: bool,
}

impl ConfigFacade {
    /// Wrap a store. Autosave starts off.
    pub fn new(backend: StoreHandle) -> Self {
        Self {
            backend,
            autosave: false,
        }
    }

    pub fn backend(&self) -> &dyn StorageBackend {
        self.backend.as_ref()
    }

    pub fn backend_mut(&mut self) -> &mut StoreHandle {
        &mut self.backend
    }

    pub fn autosave(&self) -> bool {
        self.autosave
    }

    pub fn get(&self, key: &str) -> ScriptValue {
        self.backend.get(key)
    }

    pub fn set_default(&mut self, key: &str, value: &ScriptValue) -> Result<bool, StorageError> {
        let written = self.backend.set_default(key, value)?;
        if written && self.autosave {
            self.backend.save();
        }
        Ok(written)
    }

    pub fn set(&mut self, key: &str, value: &ScriptValue) -> Result<(), StorageError> {
        self.backend.set(key, value)?;
        if self.autosave {
            self.backend.save();
        }
        Ok(())
    }

    pub fn clear(&mut self, key: &str) -> bool {
        let removed = self.backend.clear(key);
        self.backend.save();
        removed
    }

    /// Toggle autosave. Nothing is written by the toggle itself.
    pub fn set_autosave(&mut self, enabled: bool) {
        debug!("Autosave for '{}' set to {}", self.backend.path().display(), enabled);
        self.autosave = enabled;
    }

    pub fn save(&self) {
        self.backend.save();
    }

    /// Replaces the subtree at `path` with `table`, converted as one unit.
    pub fn map_table_to_key(&mut self, path: &str, table: &ScriptTable) -> Result<(), StorageError> {
        self.backend.set_host(path, table_to_host(table))?;
        if self.autosave {
            self.backend.save();
        }
        Ok(())
    }

    pub fn into_inner(self) -> StoreHandle {
        self.backend
    }
}
