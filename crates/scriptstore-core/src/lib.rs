//! Persistent key-value storage for an embedded scripting environment.
//!
//! Scripts read and write configuration-like data through one contract,
//! [`StorageBackend`], backed either by a flat JSON object file or a
//! hierarchical YAML file. Values cross the script boundary through the
//! conversion functions in [`value`].
pub mod kernel;
pub mod script;
pub mod storage;
pub mod value;

// Re-export key public types/traits for easier use by the binary and hosts
pub use kernel::error::{Error, Result};
pub use script::{ConfigBinding, ScriptError, ScriptObject, StorageBinding};
pub use storage::{
    open_store, ConfigFacade, StorageBackend, StorageError, StorageKind, StorageManager,
    StorageSettings, StoreHandle,
};
pub use value::{HostKey, HostValue, OpaqueHandle, ScriptTable, ScriptValue, TableKey};

#[cfg(test)]
mod tests;
