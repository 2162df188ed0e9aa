use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::value::script::OpaqueHandle;

/// Backend-native value held inside a storage document.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HostValue {
    #[default]
    Null,
    Bool(bool),
    Integer(i32),
    Float(f64),
    String(String),
    List(Vec<HostValue>),
    Map(BTreeMap<HostKey, HostValue>),
    /// Reference to a host object; no file format can encode it.
    Opaque(OpaqueHandle),
}

/// Key of a host map. Keys keep their type in memory; file formats
/// address entries by name, so serializers write the text form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HostKey {
    Integer(i32),
    Bool(bool),
    String(String),
}

impl fmt::Display for HostKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostKey::Integer(i) => write!(f, "{}", i),
            HostKey::Bool(b) => write!(f, "{}", b),
            HostKey::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for HostKey {
    fn from(value: &str) -> Self {
        HostKey::String(value.to_string())
    }
}

impl From<String> for HostKey {
    fn from(value: String) -> Self {
        HostKey::String(value)
    }
}

impl Serialize for HostKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl HostValue {
    pub fn is_null(&self) -> bool {
        matches!(self, HostValue::Null)
    }

    /// Number read from a document: integers that fit in 32 bits stay
    /// integers, anything wider degrades to a float.
    pub fn from_i64(value: i64) -> Self {
        match i32::try_from(value) {
            Ok(i) => HostValue::Integer(i),
            Err(_) => HostValue::Float(value as f64),
        }
    }

    pub fn from_u64(value: u64) -> Self {
        match i32::try_from(value) {
            Ok(i) => HostValue::Integer(i),
            Err(_) => HostValue::Float(value as f64),
        }
    }

    /// Finds the first opaque reference inside this value, if any.
    pub fn find_opaque(&self) -> Option<&OpaqueHandle> {
        match self {
            HostValue::Opaque(handle) => Some(handle),
            HostValue::List(items) => items.iter().find_map(HostValue::find_opaque),
            HostValue::Map(map) => map.values().find_map(HostValue::find_opaque),
            _ => None,
        }
    }
}

impl Serialize for HostValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            HostValue::Null => serializer.serialize_unit(),
            HostValue::Bool(b) => serializer.serialize_bool(*b),
            HostValue::Integer(i) => serializer.serialize_i32(*i),
            HostValue::Float(f) => serializer.serialize_f64(*f),
            HostValue::String(s) => serializer.serialize_str(s),
            HostValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            HostValue::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            HostValue::Opaque(handle) => Err(S::Error::custom(format!(
                "opaque host object of type {} cannot be serialized",
                handle.type_name()
            ))),
        }
    }
}
