//! # Scriptstore Storage Errors
//!
//! Defines [`StorageError`], the error raised across the script boundary
//! by backend operations that can genuinely fail: serializing a value a
//! file format cannot encode, addressing the document root, asking for a
//! file kind no backend handles, or a flush that could not reach the disk.
//!
//! Load failures are not errors: they degrade to an empty document and
//! are reported through [`LoadDiagnostic`](crate::storage::LoadDiagnostic).
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error during operation '{operation}' on path '{path}': {source}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Value for key '{key}' cannot be stored: {reason}")]
    Unserializable { key: String, reason: String },

    #[error("Serialization to '{format}' failed: {source}")]
    SerializationError {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Unsupported storage file type: {0} (expected .json, .yml or .yaml)")]
    UnsupportedFormat(PathBuf),

    #[error("Cannot set a value at the empty path")]
    EmptyPath,
}

// Helper for creating Io errors, ensuring path is always included.
impl StorageError {
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        StorageError::Io {
            source,
            operation: operation.into(),
            path,
        }
    }

    pub fn unserializable(key: impl Into<String>, reason: impl Into<String>) -> Self {
        StorageError::Unserializable {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
