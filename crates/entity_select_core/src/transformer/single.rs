//! Single-value transformer: one object ⇄ one key.

use super::{Binding, TransformError, TransformResult, WireEntry};
use crate::access::{EntityClass, FieldAccessor};
use crate::config::{ConfigError, TransformerConfig};
use crate::logging::sanitize_for_log;
use crate::store::ObjectStore;
use log::warn;
use std::fmt::Display;

/// Transformer for selects holding at most one object.
pub struct SingleTransformer<E, S, A> {
    pub(super) binding: Binding<E, S, A>,
}

impl<E, S, A> SingleTransformer<E, S, A>
where
    E: Display,
    S: ObjectStore<E>,
    A: FieldAccessor<E>,
{
    pub fn new(
        class: EntityClass<E>,
        config: TransformerConfig,
        store: S,
        accessor: A,
    ) -> Result<Self, ConfigError> {
        Binding::new(class, config, store, accessor).map(|binding| Self { binding })
    }

    /// Object → wire key.
    ///
    /// Persisted objects yield their primary key; unsaved ones yield
    /// `prefix + label`.
    pub fn to_wire(&self, value: Option<&E>) -> TransformResult<Option<String>> {
        Ok(self.to_wire_entry(value)?.map(|entry| entry.key))
    }

    /// Object → key plus display label.
    ///
    /// The label of an unsaved object carries the tag decoration, matching
    /// the collection transformer.
    pub fn to_wire_entry(&self, value: Option<&E>) -> TransformResult<Option<WireEntry>> {
        value.map(|entity| self.binding.entry(entity)).transpose()
    }

    /// Wire key → object.
    ///
    /// Blank input yields `None`. Tag keys produce a new unsaved object
    /// without touching the store.
    ///
    /// # Errors
    /// - `TransformationFailed` when the key does not match exactly one
    ///   persisted object.
    pub fn from_wire(&self, key: Option<&str>) -> TransformResult<Option<E>> {
        let Some(key) = key.filter(|key| !key.trim().is_empty()) else {
            return Ok(None);
        };

        if let Some(label) = self.binding.policy.strip_tag(key) {
            return self.binding.materialize(label).map(Some);
        }

        let keys = vec![key.to_string()];
        let mut found = self.binding.fetch(&keys)?;
        if found.len() != 1 {
            warn!(
                "event=reverse_transform module=transformer status=error mode=single class={} key={} found={}",
                self.binding.class.name(),
                sanitize_for_log(key),
                found.len()
            );
            return Err(TransformError::TransformationFailed {
                message: format!("the choice `{key}` does not exist or is not unique"),
                keys,
            });
        }
        Ok(found.pop())
    }
}
