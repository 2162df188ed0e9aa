//! Hierarchical backend.
//!
//! The document is a YAML mapping addressed by separator-delimited paths
//! (`limits.nested.min`). Writes create intermediate sections as needed;
//! writing nil removes the node.
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_yaml::{Mapping, Value};

use crate::storage::backend::{ensure_file, LoadDiagnostic, Loaded, StorageBackend, StorageKind};
use crate::storage::error::StorageError;
use crate::storage::provider::StorageProvider;
use crate::storage::settings::StorageSettings;
use crate::value::{HostKey, HostValue, ScriptValue};

/// Reads and parses the document at `path`.
pub fn load_document(provider: &dyn StorageProvider, path: &Path) -> Loaded<Mapping> {
    match provider.read_to_string(path) {
        Ok(content) => parse_document(&content),
        Err(e) => Loaded::degraded(LoadDiagnostic::Unreadable(e)),
    }
}

/// Parses file content. Blank content is a fresh, empty document.
pub fn parse_document(content: &str) -> Loaded<Mapping> {
    if content.trim().is_empty() {
        return Loaded::clean(Mapping::new());
    }
    match serde_yaml::from_str::<Value>(content) {
        Ok(Value::Null) => Loaded::clean(Mapping::new()),
        Ok(Value::Mapping(root)) => Loaded::clean(normalize_keys(root)),
        Ok(_) => Loaded::degraded(LoadDiagnostic::Malformed(
            "top level is not a mapping".to_string(),
        )),
        Err(e) => Loaded::degraded(LoadDiagnostic::Malformed(e.to_string())),
    }
}

/// Paths are strings, so every mapping key read from disk becomes one.
fn normalize_keys(mapping: Mapping) -> Mapping {
    mapping
        .into_iter()
        .map(|(k, v)| {
            let v = match v {
                Value::Mapping(inner) => Value::Mapping(normalize_keys(inner)),
                other => other,
            };
            (Value::String(key_to_string(&k)), v)
        })
        .collect()
}

fn key_to_string(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// YAML → host value.
pub fn from_yaml(value: &Value) -> HostValue {
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
        Value::Sequence(items) => HostValue::List(items.iter().map(from_yaml).collect()),
        Value::Mapping(map) => HostValue::Map(
            map.iter()
                .map(|(k, v)| (HostKey::String(key_to_string(k)), from_yaml(v)))
                .collect(),
        ),
        Value::Tagged(tagged) => from_yaml(&tagged.value),
    }
}

/// Host value → YAML, rejecting opaque references.
pub fn to_yaml(key: &str, value: &HostValue) -> Result<Value, StorageError> {
    if let Some(handle) = value.find_opaque() {
        return Err(StorageError::unserializable(
            key,
            format!("opaque host object of type {} has no YAML form", handle.type_name()),
        ));
    }
    serde_yaml::to_value(value).map_err(|e| StorageError::SerializationError {
        format: "yaml".to_string(),
        source: Box::new(e),
    })
}

/// Inserts `value` under `segments`, creating sections on the way.
/// Writing through a scalar replaces it with a section.
fn insert_at(mapping: &mut Mapping, segments: &[&str], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        mapping.insert(Value::String(first.to_string()), value);
        return;
    }
    match mapping.get_mut(*first) {
        Some(Value::Mapping(section)) => insert_at(section, rest, value),
        _ => {
            let mut section = Mapping::new();
            insert_at(&mut section, rest, value);
            mapping.insert(Value::String(first.to_string()), Value::Mapping(section));
        }
    }
}

/// Storage over a nested YAML mapping file.
pub struct YamlStorage {
    path: PathBuf,
    provider: Arc<dyn StorageProvider>,
    separator: char,
    root: Mapping,
}

impl YamlStorage {
    pub fn new(
        path: PathBuf,
        provider: Arc<dyn StorageProvider>,
        settings: &StorageSettings,
        root: Mapping,
    ) -> Self {
        Self {
            path,
            provider,
            separator: settings.path_separator,
            root,
        }
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Splits `key` into its parent segments and final segment.
    fn split<'k>(&self, key: &'k str) -> (Vec<&'k str>, &'k str) {
        let mut parents: Vec<&str> = key.split(self.separator).collect();
        // `split` always yields at least one item.
        let last = parents.pop().unwrap_or(key);
        (parents, last)
    }

    fn resolve(&self, key: &str) -> Option<&Value> {
        if key.is_empty() {
            return None;
        }
        let (parents, last) = self.split(key);
        let mut current = &self.root;
        for segment in parents {
            current = current.get(segment)?.as_mapping()?;
        }
        current.get(last)
    }

    fn remove_node(&mut self, key: &str) -> Option<Value> {
        let (parents, last) = self.split(key);
        let mut current = &mut self.root;
        for segment in parents {
            current = current.get_mut(segment)?.as_mapping_mut()?;
        }
        current.remove(last)
    }

    fn render(&self) -> Result<String, StorageError> {
        serde_yaml::to_string(&self.root).map_err(|e| StorageError::SerializationError {
            format: "yaml".to_string(),
            source: Box::new(e),
        })
    }
}

impl StorageBackend for YamlStorage {
    fn kind(&self) -> StorageKind {
        StorageKind::Yaml
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn exists(&self, key: &str) -> bool {
        self.resolve(key).is_some_and(|v| !v.is_null())
    }

    fn set_default(&mut self, key: &str, value: &ScriptValue) -> Result<bool, StorageError> {
        // Same resolve-to-non-null test as `exists`: a null node counts as unset.
        // Nil would be a removal here, so there is nothing to write.
        if self.exists(key) || value.is_nil() {
            return Ok(false);
        }
        self.set(key, value)?;
        Ok(true)
    }

    fn set_host(&mut self, key: &str, value: HostValue) -> Result<(), StorageError> {
        if key.is_empty() {
            return Err(StorageError::EmptyPath);
        }
        if value.is_null() {
            self.remove_node(key);
            return Ok(());
        }

        let value = to_yaml(key, &value)?;
        let segments: Vec<&str> = key.split(self.separator).collect();
        insert_at(&mut self.root, &segments, value);
        Ok(())
    }

    fn get_host(&self, key: &str) -> HostValue {
        self.resolve(key).map(from_yaml).unwrap_or_default()
    }

    fn clear(&mut self, key: &str) -> bool {
        if !self.exists(key) {
            return false;
        }
        self.remove_node(key).is_some()
    }

    fn snapshot(&self) -> HostValue {
        HostValue::Map(
            self.root
                .iter()
                .map(|(k, v)| (HostKey::String(key_to_string(k)), from_yaml(v)))
                .collect(),
        )
    }

    fn flush(&self) -> Result<(), StorageError> {
        ensure_file(self.provider.as_ref(), &self.path)?;
        let content = self.render()?;
        self.provider.write_string(&self.path, &content)
    }
}

impl fmt::Debug for YamlStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YamlStorage")
            .field("path", &self.path)
            .field("provider", &self.provider.name())
            .field("separator", &self.separator)
            .field("sections", &self.root.len())
            .finish()
    }
}
