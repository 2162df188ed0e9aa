//! # Scriptstore Storage
//!
//! Persistent key-value stores backed by human-editable files.
//!
//! - [`StorageBackend`]: the operation set scripts see (`exists`, `get`,
//!   `set`, `set_default`, `clear`, `save`), implemented by
//!   [`JsonStorage`] (flat top-level keys) and, with the `yaml-config`
//!   feature, [`YamlStorage`] (separator-delimited paths).
//! - [`open_store`]: the factory. It resolves the file under the owner's
//!   data directory, creates it if absent and loads it before returning a
//!   [`StoreHandle`]. Unreadable or malformed files start empty.
//! - [`ConfigFacade`]: default-setting, autosave and bulk table writes on
//!   top of one store.
//! - [`StorageManager`]: per-owner cache of open stores plus the owner's
//!   main configuration.
pub mod backend;
pub mod config;
pub mod error;
pub mod json;
pub mod local;
pub mod manager;
pub mod provider;
pub mod settings;
#[cfg(feature = "yaml-config")]
pub mod yaml;

/// Re-export key types
pub use backend::{
    ensure_file, open_store, open_store_loaded, resolve_store_path, LoadDiagnostic, Loaded, StorageBackend,
    StorageKind, StoreHandle,
};
pub use config::ConfigFacade;
pub use error::StorageError;
pub use json::JsonStorage;
pub use local::LocalStorageProvider;
pub use manager::StorageManager;
pub use provider::StorageProvider;
pub use settings::StorageSettings;
#[cfg(feature = "yaml-config")]
pub use yaml::YamlStorage;

#[cfg(test)]
mod tests;
