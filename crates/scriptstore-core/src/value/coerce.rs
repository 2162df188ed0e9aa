//! Conversion between [`ScriptValue`] and [`HostValue`].
//!
//! Both directions are total and lossless. Tables keyed exactly `1..=n`
//! travel as lists; every other table travels as a map whose keys keep
//! their integer, boolean or text type.
use std::collections::BTreeMap;

use crate::value::host::{HostKey, HostValue};
use crate::value::script::{ScriptTable, ScriptValue, TableKey};

fn key_to_host(key: &TableKey) -> HostKey {
    match key {
        TableKey::Integer(i) => HostKey::Integer(*i),
        TableKey::Boolean(b) => HostKey::Bool(*b),
        TableKey::Text(s) => HostKey::String(s.clone()),
    }
}

fn key_to_script(key: &HostKey) -> TableKey {
    match key {
        HostKey::Integer(i) => TableKey::Integer(*i),
        HostKey::Bool(b) => TableKey::Boolean(*b),
        HostKey::String(s) => TableKey::Text(s.clone()),
    }
}

/// Script → host.
pub fn to_host(value: &ScriptValue) -> HostValue {
    match value {
        ScriptValue::Nil => HostValue::Null,
        ScriptValue::Boolean(b) => HostValue::Bool(*b),
        ScriptValue::Integer(i) => HostValue::Integer(*i),
        ScriptValue::Float(f) => HostValue::Float(*f),
        ScriptValue::Text(s) => HostValue::String(s.clone()),
        ScriptValue::Table(table) => table_to_host(table),
        ScriptValue::Opaque(handle) => HostValue::Opaque(handle.clone()),
    }
}

/// Converts a table on its own, recursing into nested tables.
pub fn table_to_host(table: &ScriptTable) -> HostValue {
    if table.sequence_len().is_some() {
        // Iteration order of a sequence table is 1, 2, ..., n.
        return HostValue::List(table.iter().map(|(_, v)| to_host(v)).collect());
    }

    let map: BTreeMap<HostKey, HostValue> = table
        .iter()
        .map(|(k, v)| (key_to_host(k), to_host(v)))
        .collect();
    HostValue::Map(map)
}

/// Host → script.
pub fn to_script(value: &HostValue) -> ScriptValue {
    match value {
        HostValue::Null => ScriptValue::Nil,
        HostValue::Bool(b) => ScriptValue::Boolean(*b),
        HostValue::Integer(i) => ScriptValue::Integer(*i),
        HostValue::Float(f) => ScriptValue::Float(*f),
        HostValue::String(s) => ScriptValue::Text(s.clone()),
        HostValue::List(items) => {
            ScriptValue::Table(ScriptTable::from_sequence(items.iter().map(to_script)))
        }
        HostValue::Map(map) => ScriptValue::Table(
            map.iter()
                .map(|(k, v)| (key_to_script(k), to_script(v)))
                .collect(),
        ),
        HostValue::Opaque(handle) => ScriptValue::Opaque(handle.clone()),
    }
}
