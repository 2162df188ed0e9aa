//! # Scriptstore Script Adapter Errors
//!
//! [`ScriptError`] is what a script sees when a call into a storage
//! object or the configuration wrapper cannot proceed: the method does not
//! exist, an argument has the wrong type, or the store refused the value.
use thiserror::Error;

use crate::storage::error::StorageError;
use crate::value::error::CoercionError;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("'{object}' has no method '{method}'")]
    UnknownMethod { object: &'static str, method: String },

    #[error("bad argument #{position} to '{method}': {source}")]
    BadArgument {
        method: String,
        position: usize,
        #[source]
        source: CoercionError,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ScriptError {
    pub fn bad_argument(method: impl Into<String>, position: usize, source: CoercionError) -> Self {
        ScriptError::BadArgument {
            method: method.into(),
            position,
            source,
        }
    }
}
