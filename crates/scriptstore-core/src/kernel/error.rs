//! # Scriptstore Kernel Errors
//!
//! [`Error`] wraps the typed errors of each subsystem so callers that
//! drive several of them (the operator binary, host glue code) can use a
//! single [`Result`] alias and `?` throughout.
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::script::error::ScriptError;
use crate::storage::error::StorageError;
use crate::value::error::CoercionError;

#[derive(Debug, ThisError)]
pub enum Error {
    /// Specific, typed storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A value did not have the shape the caller needed
    #[error("Coercion error: {0}")]
    Coercion(#[from] CoercionError),

    /// A scripted call was rejected
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;
