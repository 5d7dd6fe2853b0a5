//! In-process object store.

use super::{ObjectStore, StoreError, StoreResult};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Object store holding persisted objects in memory.
///
/// Objects are returned in insertion order, independent of the order keys
/// were requested in. Every `find_by_keys` call is counted so callers can
/// assert round-trip bounds.
pub struct MemoryObjectStore<E> {
    class: &'static str,
    primary_key: &'static str,
    rows: Vec<(String, E)>,
    batch_calls: AtomicUsize,
}

impl<E: Clone + PartialEq> MemoryObjectStore<E> {
    /// Creates an empty store for `class` keyed by `primary_key`.
    pub fn new(class: &'static str, primary_key: &'static str) -> Self {
        Self {
            class,
            primary_key,
            rows: Vec::new(),
            batch_calls: AtomicUsize::new(0),
        }
    }

    /// Marks `entity` as persisted under `key`.
    pub fn persist(&mut self, key: impl Into<String>, entity: E) {
        self.rows.push((key.into(), entity));
    }

    /// Number of `find_by_keys` calls served so far.
    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<E: Clone + PartialEq> ObjectStore<E> for MemoryObjectStore<E> {
    fn find_by_keys(
        &self,
        class: &str,
        primary_key: &str,
        keys: &[String],
    ) -> StoreResult<Vec<E>> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        if class != self.class {
            return Err(StoreError::UnknownClass(class.to_string()));
        }
        if primary_key != self.primary_key {
            return Err(StoreError::UnsupportedKeyField {
                class: class.to_string(),
                field: primary_key.to_string(),
            });
        }

        let wanted: HashSet<&str> = keys.iter().map(String::as_str).collect();
        Ok(self
            .rows
            .iter()
            .filter(|(key, _)| wanted.contains(key.as_str()))
            .map(|(_, entity)| entity.clone())
            .collect())
    }

    fn is_persisted(&self, entity: &E) -> StoreResult<bool> {
        Ok(self.rows.iter().any(|(_, stored)| stored == entity))
    }
}
