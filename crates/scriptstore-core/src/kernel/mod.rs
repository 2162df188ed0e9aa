//! # Scriptstore Kernel
//!
//! Crate-wide constants and the aggregated [`Error`](error::Error) type
//! that wraps each subsystem's own error.
pub mod constants;
pub mod error;

pub use error::{Error, Result};
