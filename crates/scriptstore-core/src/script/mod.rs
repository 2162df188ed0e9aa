//! # Scriptstore Script Adapters
//!
//! Thin, method-name based adapters that expose finished storage handles
//! and the configuration facade to a script runtime. The adapters are
//! built from handles that are already open and loaded; they hold no
//! state of their own beyond the borrow.
pub mod binding;
pub mod error;

pub use binding::{ConfigBinding, ScriptObject, StorageBinding};
pub use error::ScriptError;
