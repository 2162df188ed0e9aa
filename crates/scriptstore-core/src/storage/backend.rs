use std::fmt::{self, Debug};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use log::{debug, error, warn};

use crate::storage::error::StorageError;
use crate::storage::json::{self, JsonStorage};
use crate::storage::provider::StorageProvider;
use crate::storage::settings::StorageSettings;
#[cfg(feature = "yaml-config")]
use crate::storage::yaml::{self, YamlStorage};
use crate::value::{coerce, HostValue, ScriptValue};

/// Supported storage file kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    /// Flat object file (.json)
    Json,
    /// Hierarchical file (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
}

impl StorageKind {
    /// Name reported to scripts by `getType`.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKind::Json => "json",
            #[cfg(feature = "yaml-config")]
            StorageKind::Yaml => "yaml",
        }
    }

    /// Determine kind from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(StorageKind::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(StorageKind::Yaml),
                _ => None,
            })
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a load fell back to an empty document.
#[derive(Debug)]
pub enum LoadDiagnostic {
    /// The file could not be read.
    Unreadable(StorageError),
    /// The file was read but its content is not a valid document.
    Malformed(String),
}

impl fmt::Display for LoadDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadDiagnostic::Unreadable(e) => write!(f, "unreadable: {}", e),
            LoadDiagnostic::Malformed(reason) => write!(f, "malformed content: {}", reason),
        }
    }
}

/// Result of loading a document. Loading never fails; a document that
/// could not be read or parsed comes back empty with a diagnostic.
#[derive(Debug)]
pub struct Loaded<D> {
    pub document: D,
    pub diagnostic: Option<LoadDiagnostic>,
}

impl<D: Default> Loaded<D> {
    pub fn clean(document: D) -> Self {
        Self { document, diagnostic: None }
    }

    pub fn degraded(diagnostic: LoadDiagnostic) -> Self {
        Self {
            document: D::default(),
            diagnostic: Some(diagnostic),
        }
    }
}

/// Operations every storage backend offers to scripts.
///
/// Absence is never an error: `get` returns nil, `set_default` and `clear`
/// report through their boolean result. Only writes of values the file
/// format cannot encode fail with [`StorageError`].
pub trait StorageBackend: Debug + Send {
    fn kind(&self) -> StorageKind;

    /// Absolute path of the backing file.
    fn path(&self) -> &Path;

    /// True iff `key` currently resolves to a value.
    fn exists(&self, key: &str) -> bool;

    /// Writes `value` only if `key` does not exist yet. Returns whether it wrote.
    fn set_default(&mut self, key: &str, value: &ScriptValue) -> Result<bool, StorageError>;

    /// Overwrites the value at `key`.
    fn set(&mut self, key: &str, value: &ScriptValue) -> Result<(), StorageError> {
        self.set_host(key, coerce::to_host(value))
    }

    /// Overwrites the value at `key` with an already converted host value.
    fn set_host(&mut self, key: &str, value: HostValue) -> Result<(), StorageError>;

    /// Value at `key`, nil when absent.
    fn get(&self, key: &str) -> ScriptValue {
        coerce::to_script(&self.get_host(key))
    }

    /// Host value at `key`, null when absent.
    fn get_host(&self, key: &str) -> HostValue;

    /// Removes `key`. Returns whether something was removed.
    fn clear(&mut self, key: &str) -> bool;

    /// The whole in-memory document as one host map.
    fn snapshot(&self) -> HostValue;

    /// Re-creates the backing file if needed and writes the whole document.
    fn flush(&self) -> Result<(), StorageError>;

    /// [`flush`](Self::flush), logging instead of returning a failure. The
    /// in-memory document stays intact either way.
    fn save(&self) {
        if let Err(e) = self.flush() {
            error!("Failed to save {} storage '{}': {}", self.kind(), self.path().display(), e);
        }
    }
}

/// Live binding between a backend and its backing file.
pub type StoreHandle = Box<dyn StorageBackend>;

/// Resolves `relative` under `data_dir`. A leading separator still means
/// "inside the data directory", and `..` never climbs above it.
pub fn resolve_store_path(data_dir: &Path, relative: &str) -> PathBuf {
    let mut inner = PathBuf::new();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => inner.push(part),
            Component::ParentDir => {
                inner.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    let joined = data_dir.join(inner);
    std::path::absolute(&joined).unwrap_or(joined)
}

/// Creates the backing file if it is missing. Returns whether it was created.
pub fn ensure_file(provider: &dyn StorageProvider, path: &Path) -> Result<bool, StorageError> {
    if provider.exists(path) {
        return Ok(false);
    }
    provider.create_file(path)?;
    debug!("Created storage file '{}'", path.display());
    Ok(true)
}

/// Opens a store: resolves the path, creates the file if absent and
/// loads the existing content before handing the store out. Never fails;
/// problems are logged and the store starts empty.
pub fn open_store(
    data_dir: &Path,
    relative: &str,
    kind: StorageKind,
    provider: Arc<dyn StorageProvider>,
    settings: &StorageSettings,
) -> StoreHandle {
    open_store_loaded(data_dir, relative, kind, provider, settings).document
}

/// [`open_store`], also handing back the reason the store started empty,
/// if it did.
pub fn open_store_loaded(
    data_dir: &Path,
    relative: &str,
    kind: StorageKind,
    provider: Arc<dyn StorageProvider>,
    settings: &StorageSettings,
) -> Loaded<StoreHandle> {
    let path = resolve_store_path(data_dir, relative);

    if let Err(e) = ensure_file(provider.as_ref(), &path) {
        warn!("Could not create storage file '{}': {}", path.display(), e);
    }

    let (handle, diagnostic) = match kind {
        StorageKind::Json => {
            let loaded = json::load_document(provider.as_ref(), &path);
            report_diagnostic(kind, &path, loaded.diagnostic.as_ref());
            let handle = Box::new(JsonStorage::new(path, provider, settings, loaded.document));
            (handle as StoreHandle, loaded.diagnostic)
        }
        #[cfg(feature = "yaml-config")]
        StorageKind::Yaml => {
            let loaded = yaml::load_document(provider.as_ref(), &path);
            report_diagnostic(kind, &path, loaded.diagnostic.as_ref());
            let handle = Box::new(YamlStorage::new(path, provider, settings, loaded.document));
            (handle as StoreHandle, loaded.diagnostic)
        }
    };
    Loaded {
        document: handle,
        diagnostic,
    }
}

fn report_diagnostic(kind: StorageKind, path: &Path, diagnostic: Option<&LoadDiagnostic>) {
    match diagnostic {
        Some(diagnostic) => warn!(
            "Starting {} storage '{}' empty, file is {}",
            kind,
            path.display(),
            diagnostic
        ),
        None => debug!("Loaded {} storage '{}'", kind, path.display()),
    }
}
