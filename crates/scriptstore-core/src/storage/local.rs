use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::storage::error::StorageError;
use crate::storage::provider::StorageProvider;

/// Local filesystem storage provider
#[derive(Debug, Clone, Default)]
pub struct LocalStorageProvider;

impl LocalStorageProvider {
    pub fn new() -> Self {
        Self
    }

    fn ensure_parent(&self, path: &Path, operation: &str) -> Result<(), StorageError> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                if !parent.is_dir() {
                    self.create_dir_all(parent)?;
                }
                Ok(())
            }
            // Bare file names live in the working directory.
            Some(_) => Ok(()),
            None => Err(StorageError::io(
                std::io::Error::new(ErrorKind::InvalidInput, "path has no parent directory"),
                operation,
                path.to_path_buf(),
            )),
        }
    }
}

impl StorageProvider for LocalStorageProvider {
    fn name(&self) -> &str {
        "local"
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), StorageError> {
        fs::create_dir_all(path).map_err(|e| StorageError::io(e, "create_dir_all", path.to_path_buf()))
    }

    fn create_file(&self, path: &Path) -> Result<(), StorageError> {
        self.ensure_parent(path, "create_file")?;
        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(_) => Ok(()),
            // Someone else created it in between; nothing to do.
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(StorageError::io(e, "create_file", path.to_path_buf())),
        }
    }

    fn read_to_string(&self, path: &Path) -> Result<String, StorageError> {
        fs::read_to_string(path).map_err(|e| StorageError::io(e, "read_to_string", path.to_path_buf()))
    }

    fn write_string(&self, path: &Path, contents: &str) -> Result<(), StorageError> {
        self.ensure_parent(path, "write_string")?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => Path::new(".").to_path_buf(),
        };

        // Write next to the target, then persist over it in one rename.
        let mut temp_file = NamedTempFile::new_in(&dir)
            .map_err(|e| StorageError::io(e, "create_temp_file", dir.clone()))?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| StorageError::io(e, "write_to_temp_file", temp_file.path().to_path_buf()))?;

        temp_file
            .persist(path)
            .map_err(|e| StorageError::io(e.error, "persist_temp_file", path.to_path_buf()))?;

        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<(), StorageError> {
        self.ensure_parent(to, "copy")?;
        fs::copy(from, to).map_err(|e| StorageError::io(e, "copy", from.to_path_buf()))?;
        Ok(())
    }
}
