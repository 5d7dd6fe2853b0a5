//! Object ⇄ wire transformers for selection widgets.
//!
//! # Responsibility
//! - Convert domain objects to wire keys/labels for rendering.
//! - Convert submitted keys back to objects, materializing new tags.
//!
//! # Invariants
//! - Reverse transforms issue at most one store round trip.
//! - Tag keys are never looked up in the store.
//! - A short or oversized store result fails the whole call.
//! - Transformers hold no mutable state; every call is independent.
//!
//! # See also
//! - `crate::store::ObjectStore` and `crate::access::FieldAccessor`.

use crate::access::{AccessError, EntityClass, FieldAccessor};
use crate::config::{ConfigError, ResolvedField, TransformerConfig};
use crate::logging::sanitize_for_log;
use crate::model::field::FieldValue;
use crate::store::{ObjectStore, StoreError};
use log::{debug, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod collection;
pub mod policy;
pub mod single;
pub mod wire;

pub use collection::CollectionTransformer;
pub use policy::TagPolicy;
pub use single::SingleTransformer;
pub use wire::{WireEntry, WireMap};

pub type TransformResult<T> = Result<T, TransformError>;

/// Transformer failures.
#[derive(Debug)]
pub enum TransformError {
    /// Submitted keys did not resolve to exactly the expected objects.
    TransformationFailed { message: String, keys: Vec<String> },
    /// Reading or writing a configured field failed.
    Access(AccessError),
    /// The store collaborator failed.
    Store(StoreError),
    /// A tag key was submitted but no text field is configured to hold it.
    MissingTextField { class: &'static str },
}

impl Display for TransformError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TransformationFailed { message, .. } => write!(f, "{message}"),
            Self::Access(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::MissingTextField { class } => {
                write!(f, "cannot create new `{class}` tags without a text field")
            }
        }
    }
}

impl Error for TransformError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Access(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AccessError> for TransformError {
    fn from(value: AccessError) -> Self {
        Self::Access(value)
    }
}

impl From<StoreError> for TransformError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Class, configuration and collaborators shared by both transformers.
struct Binding<E, S, A> {
    class: EntityClass<E>,
    config: TransformerConfig,
    policy: TagPolicy,
    store: S,
    accessor: A,
}

impl<E, S, A> Binding<E, S, A>
where
    E: Display,
    S: ObjectStore<E>,
    A: FieldAccessor<E>,
{
    fn new(
        class: EntityClass<E>,
        config: TransformerConfig,
        store: S,
        accessor: A,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let policy = TagPolicy::new(config.tag_prefix.as_str(), config.tag_text.as_str());
        Ok(Self {
            class,
            config,
            policy,
            store,
            accessor,
        })
    }

    /// Text field value, or the object's `Display` when none is configured.
    fn label(&self, entity: &E) -> TransformResult<String> {
        match self.config.text_field.as_deref() {
            Some(text_field) => Ok(self.accessor.read(entity, text_field)?.to_string()),
            None => Ok(entity.to_string()),
        }
    }

    /// Wire key and display label for one object.
    fn entry(&self, entity: &E) -> TransformResult<WireEntry> {
        let label = self.label(entity)?;
        if !self.store.is_persisted(entity)? {
            return Ok(WireEntry {
                key: self.policy.tag_key(&label),
                label: self.policy.decorate(&label),
            });
        }

        let primary_key = self.config.primary_key.as_str();
        let key = match self.accessor.read(entity, primary_key)? {
            FieldValue::Null => return Err(AccessError::EmptyValue(primary_key.to_string()).into()),
            value => value.to_string(),
        };
        if self.policy.collides(&key) {
            warn!(
                "event=tag_prefix_collision module=transformer status=warn class={} key={}",
                self.class.name(),
                sanitize_for_log(&key)
            );
        }
        Ok(WireEntry { key, label })
    }

    /// Builds a new, unsaved object carrying `label` in its text field.
    fn materialize(&self, label: &str) -> TransformResult<E> {
        let text_field =
            self.config
                .text_field
                .as_deref()
                .ok_or(TransformError::MissingTextField {
                    class: self.class.name(),
                })?;
        let mut entity = self.class.instantiate();
        self.accessor
            .write(&mut entity, text_field, FieldValue::from(label))?;
        debug!(
            "event=tag_materialized module=transformer status=ok class={} label={}",
            self.class.name(),
            sanitize_for_log(label)
        );
        Ok(entity)
    }

    /// Resolves `keys` in one store call. No call is made for an empty set.
    fn fetch(&self, keys: &[String]) -> TransformResult<Vec<E>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let found = self
            .store
            .find_by_keys(self.class.name(), &self.config.primary_key, keys)?;
        debug!(
            "event=keys_resolved module=transformer status=ok class={} requested={} found={}",
            self.class.name(),
            keys.len(),
            found.len()
        );
        Ok(found)
    }
}

/// Transformer chosen by the field's `multiple` option.
pub enum SelectTransformer<E, S, A> {
    Single(SingleTransformer<E, S, A>),
    Collection(CollectionTransformer<E, S, A>),
}

impl<E, S, A> SelectTransformer<E, S, A>
where
    E: Display,
    S: ObjectStore<E>,
    A: FieldAccessor<E>,
{
    /// Builds the transformer for resolved field options.
    ///
    /// # Errors
    /// - Options name a different class than `class`.
    /// - The transformer configuration is invalid.
    pub fn from_field(
        field: &ResolvedField,
        class: EntityClass<E>,
        store: S,
        accessor: A,
    ) -> Result<Self, ConfigError> {
        if field.class != class.name() {
            return Err(ConfigError::ClassMismatch {
                expected: class.name().to_string(),
                found: field.class.clone(),
            });
        }
        let config = field.transformer.clone();
        if field.multiple {
            CollectionTransformer::new(class, config, store, accessor).map(Self::Collection)
        } else {
            SingleTransformer::new(class, config, store, accessor).map(Self::Single)
        }
    }

    pub fn is_multiple(&self) -> bool {
        matches!(self, Self::Collection(_))
    }

    /// Renders current values. Single mode renders only the first value.
    pub fn render(&self, values: &[E]) -> TransformResult<WireMap> {
        match self {
            Self::Single(transformer) => {
                if values.len() > 1 {
                    warn!(
                        "event=render module=transformer status=warn mode=single class={} values={} dropped={}",
                        transformer.binding.class.name(),
                        values.len(),
                        values.len() - 1
                    );
                }
                let mut map = WireMap::new();
                if let Some(entry) = transformer.to_wire_entry(values.first())? {
                    map.insert(entry.key, entry.label);
                }
                Ok(map)
            }
            Self::Collection(transformer) => transformer.to_wire(values),
        }
    }

    /// Converts a submitted JSON payload back to objects.
    ///
    /// Single mode accepts a string or a number key and yields at most one
    /// object; any other payload shape yields nothing.
    pub fn submit(&self, payload: &Value) -> TransformResult<Vec<E>> {
        match self {
            Self::Single(transformer) => {
                let key = match payload {
                    Value::String(key) => Some(key.clone()),
                    Value::Number(number) => Some(number.to_string()),
                    _ => None,
                };
                let entity = transformer.from_wire(key.as_deref())?;
                Ok(entity.into_iter().collect())
            }
            Self::Collection(transformer) => transformer.from_wire_value(payload),
        }
    }
}
