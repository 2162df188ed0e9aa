use std::fmt::Debug;
use std::path::Path;

use crate::storage::error::StorageError;

/// File access used by the storage backends. Every call opens and closes
/// its own descriptor.
pub trait StorageProvider: Send + Sync + Debug {
    /// Get the name of this provider
    fn name(&self) -> &str;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all its parent directories
    fn create_dir_all(&self, path: &Path) -> Result<(), StorageError>;

    /// Create an empty file (and its parent directories) if nothing exists at `path`
    fn create_file(&self, path: &Path) -> Result<(), StorageError>;

    /// Read a file to a string
    fn read_to_string(&self, path: &Path) -> Result<String, StorageError>;

    /// Replace the contents of a file
    fn write_string(&self, path: &Path, contents: &str) -> Result<(), StorageError>;

    /// Copy a file, replacing `to` if it exists
    fn copy(&self, from: &Path, to: &Path) -> Result<(), StorageError>;
}
