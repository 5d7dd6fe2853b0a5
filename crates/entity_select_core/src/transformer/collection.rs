//! Collection transformer: ordered objects ⇄ ordered key→label map.

use super::{Binding, TransformError, TransformResult, WireMap};
use crate::access::{EntityClass, FieldAccessor};
use crate::config::{ConfigError, TransformerConfig};
use crate::store::ObjectStore;
use log::{debug, warn};
use serde_json::Value;
use std::fmt::Display;

/// Transformer for multi-selects.
pub struct CollectionTransformer<E, S, A> {
    binding: Binding<E, S, A>,
}

impl<E, S, A> CollectionTransformer<E, S, A>
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

    /// Objects → ordered wire map.
    ///
    /// Entries follow input order. When two objects compute the same key,
    /// the later label overwrites the earlier one.
    pub fn to_wire(&self, values: &[E]) -> TransformResult<WireMap> {
        let mut map = WireMap::new();
        for entity in values {
            let entry = self.binding.entry(entity)?;
            map.insert(entry.key, entry.label);
        }
        Ok(map)
    }

    /// Wire map → objects.
    ///
    /// Tag entries become new unsaved objects; every other key is resolved
    /// in one store call. The result lists resolved objects in store order,
    /// followed by new objects in wire order.
    ///
    /// # Errors
    /// - `TransformationFailed` when the store returns a different number
    ///   of objects than keys were requested.
    pub fn from_wire(&self, payload: Option<&WireMap>) -> TransformResult<Vec<E>> {
        let Some(payload) = payload.filter(|payload| !payload.is_empty()) else {
            return Ok(Vec::new());
        };

        let mut new_objects = Vec::new();
        let mut keys = Vec::new();
        for key in payload.keys() {
            match self.binding.policy.strip_tag(key) {
                Some(label) => new_objects.push(self.binding.materialize(label)?),
                None => keys.push(key.to_string()),
            }
        }

        let mut resolved = self.binding.fetch(&keys)?;
        if resolved.len() != keys.len() {
            warn!(
                "event=reverse_transform module=transformer status=error mode=multiple class={} requested={} found={}",
                self.binding.class.name(),
                keys.len(),
                resolved.len()
            );
            return Err(TransformError::TransformationFailed {
                message: "one or more id values are invalid".to_string(),
                keys,
            });
        }

        resolved.extend(new_objects);
        Ok(resolved)
    }

    /// Submitted JSON → objects.
    ///
    /// Anything other than a JSON object yields an empty result.
    pub fn from_wire_value(&self, payload: &Value) -> TransformResult<Vec<E>> {
        match WireMap::from_json_value(payload) {
            Some(map) => self.from_wire(Some(&map)),
            None => {
                debug!(
                    "event=reverse_transform module=transformer status=skipped mode=multiple class={} reason=not_a_map",
                    self.binding.class.name()
                );
                Ok(Vec::new())
            }
        }
    }
}
