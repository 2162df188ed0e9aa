//! Flat object backend.
//!
//! The document is one JSON object. Keys address top-level entries only:
//! a key such as `"a.b"` is a literal key, never a path into `a`.
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Number, Value};

use crate::storage::backend::{ensure_file, LoadDiagnostic, Loaded, StorageBackend, StorageKind};
use crate::storage::error::StorageError;
use crate::storage::provider::StorageProvider;
use crate::storage::settings::StorageSettings;
use crate::value::{HostKey, HostValue, ScriptValue};

pub type JsonDocument = Map<String, Value>;

/// Reads and parses the document at `path`.
pub fn load_document(provider: &dyn StorageProvider, path: &Path) -> Loaded<JsonDocument> {
    match provider.read_to_string(path) {
        Ok(content) => parse_document(&content),
        Err(e) => Loaded::degraded(LoadDiagnostic::Unreadable(e)),
    }
}

/// Parses file content. Blank content is a fresh, empty document.
pub fn parse_document(content: &str) -> Loaded<JsonDocument> {
    if content.trim().is_empty() {
        return Loaded::clean(JsonDocument::new());
    }
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(map)) => Loaded::clean(map),
        Ok(other) => Loaded::degraded(LoadDiagnostic::Malformed(format!(
            "top level is {} but must be an object",
            json_type_name(&other)
        ))),
        Err(e) => Loaded::degraded(LoadDiagnostic::Malformed(e.to_string())),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Host value → JSON, rejecting what JSON cannot hold.
pub fn to_json(key: &str, value: &HostValue) -> Result<Value, StorageError> {
    Ok(match value {
        HostValue::Null => Value::Null,
        HostValue::Bool(b) => Value::Bool(*b),
        HostValue::Integer(i) => Value::from(*i),
        HostValue::Float(f) => Number::from_f64(*f)
            .map(Value::Number)
            .ok_or_else(|| StorageError::unserializable(key, format!("{} is not a finite number", f)))?,
        HostValue::String(s) => Value::String(s.clone()),
        HostValue::List(items) => Value::Array(
            items
                .iter()
                .map(|item| to_json(key, item))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        HostValue::Map(map) => Value::Object(
            map.iter()
                .map(|(k, v)| Ok((k.to_string(), to_json(key, v)?)))
                .collect::<Result<Map<_, _>, StorageError>>()?,
        ),
        HostValue::Opaque(handle) => {
            return Err(StorageError::unserializable(
                key,
                format!("opaque host object of type {} has no JSON form", handle.type_name()),
            ));
        }
    })
}

/// JSON → host value.
pub fn from_json(value: &Value) -> HostValue {
    match value {
        Value::Null => HostValue::Null,
        Value::Bool(b) => HostValue::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                HostValue::from_i64(i)
            } else if let Some(u) = n.as_u64() {
                HostValue::from_u64(u)
            } else {
                n.as_f64().map(HostValue::Float).unwrap_or(HostValue::Null)
            }
        }
        Value::String(s) => HostValue::String(s.clone()),
        Value::Array(items) => HostValue::List(items.iter().map(from_json).collect()),
        Value::Object(map) => HostValue::Map(
            map.iter()
                .map(|(k, v)| (HostKey::from(k.as_str()), from_json(v)))
                .collect(),
        ),
    }
}

/// Storage over a single-level JSON object file.
pub struct JsonStorage {
    path: PathBuf,
    provider: Arc<dyn StorageProvider>,
    pretty: bool,
    document: JsonDocument,
}

impl JsonStorage {
    pub fn new(
        path: PathBuf,
        provider: Arc<dyn StorageProvider>,
        settings: &StorageSettings,
        document: JsonDocument,
    ) -> Self {
        Self {
            path,
            provider,
            pretty: settings.pretty_json,
            document,
        }
    }

    /// Top-level keys currently in the document.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.document.keys().map(String::as_str)
    }

    fn render(&self) -> Result<String, StorageError> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&self.document)
        } else {
            serde_json::to_string(&self.document)
        };
        rendered.map_err(|e| StorageError::SerializationError {
            format: "json".to_string(),
            source: Box::new(e),
        })
    }
}

impl StorageBackend for JsonStorage {
    fn kind(&self) -> StorageKind {
        StorageKind::Json
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn exists(&self, key: &str) -> bool {
        self.document.contains_key(key)
    }

    fn set_default(&mut self, key: &str, value: &ScriptValue) -> Result<bool, StorageError> {
        // Membership, not nullness: an explicit null already counts as set.
        if self.document.contains_key(key) {
            return Ok(false);
        }
        self.set(key, value)?;
        Ok(true)
    }

    fn set_host(&mut self, key: &str, value: HostValue) -> Result<(), StorageError> {
        let value = to_json(key, &value)?;
        self.document.insert(key.to_string(), value);
        Ok(())
    }

    fn get_host(&self, key: &str) -> HostValue {
        self.document.get(key).map(from_json).unwrap_or_default()
    }

    fn clear(&mut self, key: &str) -> bool {
        self.document.remove(key).is_some()
    }

    fn snapshot(&self) -> HostValue {
        HostValue::Map(
            self.document
                .iter()
                .map(|(k, v)| (HostKey::from(k.as_str()), from_json(v)))
                .collect(),
        )
    }

    fn flush(&self) -> Result<(), StorageError> {
        ensure_file(self.provider.as_ref(), &self.path)?;
        let content = self.render()?;
        self.provider.write_string(&self.path, &content)
    }
}

impl fmt::Debug for JsonStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonStorage")
            .field("path", &self.path)
            .field("provider", &self.provider.name())
            .field("entries", &self.document.len())
            .finish()
    }
}
