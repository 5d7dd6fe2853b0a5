//! Tag entity.
//!
//! # Responsibility
//! - Define the free-text label entity that selection widgets create inline.
//! - Expose its class identity and field whitelist for transformers.
//!
//! # Invariants
//! - `id` is `None` until the tag is persisted.
//! - Only `name` is writable through the generic accessor.

use crate::access::{AccessError, EntityClass, FieldRegistry};
use crate::model::field::FieldValue;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Class name used for tag lookups.
pub const TAG_CLASS: &str = "tag";

/// Label entity keyed by an integer id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Row id assigned by storage. `None` for unsaved tags.
    pub id: Option<i64>,
    /// Display name, also the free text typed by the user.
    pub name: String,
}

impl Tag {
    /// Creates an unsaved tag.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// Creates a tag with a known storage id.
    pub fn with_id(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    /// Class identity and blank-instance factory.
    pub fn entity_class() -> EntityClass<Tag> {
        EntityClass::new(TAG_CLASS, Tag::default)
    }

    /// Readable `id`/`name`; writable `name` only.
    pub fn field_registry() -> FieldRegistry<Tag> {
        FieldRegistry::<Tag>::new(TAG_CLASS)
            .readable("id", |tag| FieldValue::from(tag.id))
            .readable("name", |tag| FieldValue::from(tag.name.as_str()))
            .writable("name", write_name)
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn write_name(tag: &mut Tag, value: FieldValue) -> Result<(), AccessError> {
    match value {
        FieldValue::Text(name) => {
            tag.name = name;
            Ok(())
        }
        _ => Err(AccessError::TypeMismatch {
            path: "name".to_string(),
            expected: "text",
        }),
    }
}
