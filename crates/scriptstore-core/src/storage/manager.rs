use std::collections::HashMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;
#[cfg(feature = "yaml-config")]
use log::warn;

#[cfg(feature = "yaml-config")]
use crate::kernel::constants::{BROKEN_CONFIG_FILE, DEFAULT_CONFIG_FILE};
use crate::storage::backend::{open_store, resolve_store_path, StorageKind, StoreHandle};
#[cfg(feature = "yaml-config")]
use crate::storage::backend::{open_store_loaded, LoadDiagnostic};
#[cfg(feature = "yaml-config")]
use crate::storage::config::ConfigFacade;
use crate::storage::error::StorageError;
use crate::storage::local::LocalStorageProvider;
use crate::storage::provider::StorageProvider;
use crate::storage::settings::StorageSettings;

/// Per-owner entry point to storage.
///
/// Stores are opened on first request and cached by their resolved file
/// path, so every later request for the same file returns the same handle,
/// however the relative path was spelled. The main configuration shares
/// that rule: once [`config`](Self::config) is open, asking for
/// `config.yml` as a storage object hands out the configuration's own
/// backend.
/// Nothing is flushed on drop; call [`save_all`](Self::save_all) or save
/// individual handles explicitly.
pub struct StorageManager {
    data_dir: PathBuf,
    provider: Arc<dyn StorageProvider>,
    settings: StorageSettings,
    objects: HashMap<PathBuf, StoreHandle>,
    #[cfg(feature = "yaml-config")]
    config: Option<ConfigFacade>,
}

impl StorageManager {
    /// Create a manager over `data_dir` with a [`LocalStorageProvider`]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_provider(data_dir, Arc::new(LocalStorageProvider::new()))
    }

    /// Create a manager with a custom provider
    pub fn with_provider(data_dir: impl Into<PathBuf>, provider: Arc<dyn StorageProvider>) -> Self {
        Self {
            data_dir: data_dir.into(),
            provider,
            settings: StorageSettings::default(),
            objects: HashMap::new(),
            #[cfg(feature = "yaml-config")]
            config: None,
        }
    }

    /// Replace the settings used for stores opened from now on
    pub fn with_settings(mut self, settings: StorageSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn settings(&self) -> &StorageSettings {
        &self.settings
    }

    pub fn provider(&self) -> &Arc<dyn StorageProvider> {
        &self.provider
    }

    /// Cached store for `relative`, its kind picked from the file extension.
    pub fn storage_object(&mut self, relative: &str) -> Result<&mut StoreHandle, StorageError> {
        let kind = StorageKind::from_path(Path::new(relative))
            .ok_or_else(|| StorageError::UnsupportedFormat(PathBuf::from(relative)))?;
        let path = resolve_store_path(&self.data_dir, relative);

        #[cfg(feature = "yaml-config")]
        if let Some(config) = self.config.as_mut() {
            if config.backend().path() == path {
                return Ok(config.backend_mut());
            }
        }

        let handle = self.objects.entry(path).or_insert_with(|| {
            debug!("Opening {} storage object '{}'", kind, relative);
            open_store(&self.data_dir, relative, kind, Arc::clone(&self.provider), &self.settings)
        });
        Ok(handle)
    }

    /// Drop a cached store without saving it.
    pub fn close(&mut self, relative: &str) -> Option<StoreHandle> {
        self.objects.remove(&resolve_store_path(&self.data_dir, relative))
    }

    /// Number of cached storage objects (the main configuration excluded).
    pub fn open_count(&self) -> usize {
        self.objects.len()
    }

    /// The owner's main configuration, opened on first use.
    ///
    /// A `config.yml` that does not parse is copied to `config.broken.yml`
    /// before the configuration starts empty, so a later save cannot
    /// destroy the only copy.
    #[cfg(feature = "yaml-config")]
    pub fn config(&mut self) -> &mut ConfigFacade {
        let facade = match self.config.take() {
            Some(facade) => facade,
            None => ConfigFacade::new(self.open_config()),
        };
        self.config.insert(facade)
    }

    #[cfg(feature = "yaml-config")]
    fn open_config(&mut self) -> StoreHandle {
        let path = resolve_store_path(&self.data_dir, DEFAULT_CONFIG_FILE);
        // Already open as a storage object: adopt that handle.
        if let Some(handle) = self.objects.remove(&path) {
            return handle;
        }

        let loaded = open_store_loaded(
            &self.data_dir,
            DEFAULT_CONFIG_FILE,
            StorageKind::Yaml,
            Arc::clone(&self.provider),
            &self.settings,
        );
        if let Some(LoadDiagnostic::Malformed(_)) = &loaded.diagnostic {
            self.quarantine_config(&path);
        }
        loaded.document
    }

    #[cfg(feature = "yaml-config")]
    fn quarantine_config(&self, path: &Path) {
        let broken = path.with_file_name(BROKEN_CONFIG_FILE);
        match self.provider.copy(path, &broken) {
            Ok(()) => warn!(
                "The config at '{}' was invalid. It has been copied to '{}' and an empty config started",
                path.display(),
                broken.display()
            ),
            Err(e) => warn!("Could not copy invalid config '{}' aside: {}", path.display(), e),
        }
    }

    /// Flush every open store.
    pub fn save_all(&self) {
        for handle in self.objects.values() {
            handle.save();
        }
        #[cfg(feature = "yaml-config")]
        if let Some(config) = &self.config {
            config.save();
        }
    }
}

impl Debug for StorageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageManager")
            .field("data_dir", &self.data_dir)
            .field("provider", &self.provider.name()) // Show provider name
            .field("open_objects", &self.objects.len())
            .finish()
    }
}
