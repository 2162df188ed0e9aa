use std::any::Any;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::sync::Arc;

use crate::value::error::CoercionError;

/// A value as seen from the script side of the boundary.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScriptValue {
    #[default]
    Nil,
    Boolean(bool),
    Integer(i32),
    Float(f64),
    Text(String),
    Table(ScriptTable),
    /// A host object with no generic serialization.
    Opaque(OpaqueHandle),
}

impl ScriptValue {
    /// Script-facing type name, as the runtime reports it.
    pub fn type_name(&self) -> &'static str {
        match self {
            ScriptValue::Nil => "nil",
            ScriptValue::Boolean(_) => "boolean",
            ScriptValue::Integer(_) | ScriptValue::Float(_) => "number",
            ScriptValue::Text(_) => "string",
            ScriptValue::Table(_) => "table",
            ScriptValue::Opaque(_) => "userdata",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, ScriptValue::Nil)
    }

    pub fn as_boolean(&self) -> Result<bool, CoercionError> {
        match self {
            ScriptValue::Boolean(b) => Ok(*b),
            other => Err(CoercionError::mismatch("boolean", other.type_name())),
        }
    }

    pub fn as_table(&self) -> Result<&ScriptTable, CoercionError> {
        match self {
            ScriptValue::Table(t) => Ok(t),
            other => Err(CoercionError::mismatch("table", other.type_name())),
        }
    }

    /// Reads the value as a string the way the runtime does for string
    /// arguments: text is taken as-is and numbers are rendered in decimal.
    pub fn to_text(&self) -> Result<String, CoercionError> {
        match self {
            ScriptValue::Text(s) => Ok(s.clone()),
            ScriptValue::Integer(i) => Ok(i.to_string()),
            // Integral floats keep a fractional digit so they never alias integer keys
            ScriptValue::Float(f) if f.is_finite() && f.fract() == 0.0 => Ok(format!("{f:.1}")),
            ScriptValue::Float(f) => Ok(f.to_string()),
            other => Err(CoercionError::mismatch("string", other.type_name())),
        }
    }
}

impl From<bool> for ScriptValue {
    fn from(value: bool) -> Self {
        ScriptValue::Boolean(value)
    }
}

impl From<i32> for ScriptValue {
    fn from(value: i32) -> Self {
        ScriptValue::Integer(value)
    }
}

impl From<f64> for ScriptValue {
    fn from(value: f64) -> Self {
        ScriptValue::Float(value)
    }
}

impl From<&str> for ScriptValue {
    fn from(value: &str) -> Self {
        ScriptValue::Text(value.to_string())
    }
}

impl From<String> for ScriptValue {
    fn from(value: String) -> Self {
        ScriptValue::Text(value)
    }
}

impl From<ScriptTable> for ScriptValue {
    fn from(value: ScriptTable) -> Self {
        ScriptValue::Table(value)
    }
}

impl From<OpaqueHandle> for ScriptValue {
    fn from(value: OpaqueHandle) -> Self {
        ScriptValue::Opaque(value)
    }
}

/// Table keys the bridge understands.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TableKey {
    Integer(i32),
    Boolean(bool),
    Text(String),
}

impl From<i32> for TableKey {
    fn from(value: i32) -> Self {
        TableKey::Integer(value)
    }
}

impl From<bool> for TableKey {
    fn from(value: bool) -> Self {
        TableKey::Boolean(value)
    }
}

impl From<&str> for TableKey {
    fn from(value: &str) -> Self {
        TableKey::Text(value.to_string())
    }
}

impl From<String> for TableKey {
    fn from(value: String) -> Self {
        TableKey::Text(value)
    }
}

/// Script table. Assigning nil to a key removes it, as in the runtime.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScriptTable {
    entries: BTreeMap<TableKey, ScriptValue>,
}

impl ScriptTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a sequence table keyed `1..=n`.
    pub fn from_sequence<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ScriptValue>,
    {
        let mut table = Self::new();
        for (index, value) in values.into_iter().enumerate() {
            // Sequences beyond i32::MAX entries cannot be addressed by script integers anyway.
            let Ok(key) = i32::try_from(index + 1) else { break };
            table.insert(key, value);
        }
        table
    }

    pub fn insert(&mut self, key: impl Into<TableKey>, value: impl Into<ScriptValue>) -> Option<ScriptValue> {
        let key = key.into();
        match value.into() {
            ScriptValue::Nil => self.entries.remove(&key),
            value => self.entries.insert(key, value),
        }
    }

    pub fn get(&self, key: &TableKey) -> Option<&ScriptValue> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &TableKey) -> Option<ScriptValue> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, TableKey, ScriptValue> {
        self.entries.iter()
    }

    /// Returns `Some(n)` when the keys are exactly the integers `1..=n`.
    pub fn sequence_len(&self) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        // Integer keys sort before every other key kind, so a sequence is a
        // prefix of the ordered map that covers it entirely.
        let mut expected = 1i32;
        for key in self.entries.keys() {
            match key {
                TableKey::Integer(i) if *i == expected => expected += 1,
                _ => return None,
            }
        }
        Some(self.entries.len())
    }
}

impl<K, V> FromIterator<(K, V)> for ScriptTable
where
    K: Into<TableKey>,
    V: Into<ScriptValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = ScriptTable::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

impl<'a> IntoIterator for &'a ScriptTable {
    type Item = (&'a TableKey, &'a ScriptValue);
    type IntoIter = btree_map::Iter<'a, TableKey, ScriptValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Shared reference to a host object that scripts can hold and hand back
/// but not look inside. Two handles are equal when they point at the same
/// object.
#[derive(Clone)]
pub struct OpaqueHandle {
    type_name: &'static str,
    inner: Arc<dyn Any + Send + Sync>,
}

impl OpaqueHandle {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            inner: Arc::new(value),
        }
    }

    /// Rust type name of the wrapped object.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Host-side access to the wrapped object.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.inner).downcast_ref::<T>()
    }
}

impl PartialEq for OpaqueHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for OpaqueHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueHandle")
            .field("type_name", &self.type_name)
            .finish()
    }
}
