//! Wire representations exchanged with the selection widget.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// One key+label pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireEntry {
    pub key: String,
    pub label: String,
}

/// Ordered key→label mapping.
///
/// Inserting an existing key replaces its label in place: the entry keeps
/// the position of its first insertion and the last label wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WireMap {
    entries: IndexMap<String, String>,
}

impl WireMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites `key`, returning the replaced label.
    pub fn insert(&mut self, key: impl Into<String>, label: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), label.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, label)| (key.as_str(), label.as_str()))
    }

    /// Reads a submitted JSON object, keeping its key order.
    ///
    /// Returns `None` for anything that is not an object. String values
    /// become labels verbatim; other values use their JSON text.
    pub fn from_json_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(
            object
                .iter()
                .map(|(key, value)| {
                    let label = match value {
                        Value::String(text) => text.clone(),
                        Value::Null => String::new(),
                        other => other.to_string(),
                    };
                    (key.clone(), label)
                })
                .collect(),
        )
    }
}

impl<K: Into<String>, L: Into<String>> FromIterator<(K, L)> for WireMap {
    fn from_iter<I: IntoIterator<Item = (K, L)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, label)| (key.into(), label.into()))
                .collect(),
        }
    }
}
