//! # Scriptstore Value Bridge
//!
//! Two value representations meet here:
//!
//! - [`ScriptValue`]: what a script passes across the boundary (nil,
//!   booleans, 32-bit integers, floats, text, tables, opaque handles).
//! - [`HostValue`]: what the storage backends keep in their documents
//!   (strings, integers, floats, booleans, nested lists and maps keyed
//!   by [`HostKey`], opaque references).
//!
//! [`coerce`] holds the stateless conversion functions between the two.
//! Conversion is exhaustive over both enums; there is no fallible
//! "guess the type" step.
pub mod coerce;
pub mod error;
pub mod host;
pub mod script;

pub use coerce::{to_host, to_script, table_to_host};
pub use error::CoercionError;
pub use host::{HostKey, HostValue};
pub use script::{OpaqueHandle, ScriptTable, ScriptValue, TableKey};
