//! Field access and object construction contracts.
//!
//! # Responsibility
//! - Read display/key fields from domain objects by name.
//! - Write the text field of freshly constructed tag objects.
//! - Construct zero-argument instances of a configured entity class.
//!
//! # Invariants
//! - Only explicitly registered fields are readable.
//! - Only whitelisted fields are writable; everything else fails clearly.
//! - Field paths are dotted identifiers (`author.name`), never free text.

use crate::model::field::FieldValue;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod registry;

pub use registry::FieldRegistry;

static FIELD_PATH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("valid field path regex")
});

pub type AccessResult<T> = Result<T, AccessError>;

/// Field accessor failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// Path is not a dotted identifier.
    InvalidPath(String),
    /// Path is syntactically valid but not registered for this class.
    UnknownField { class: &'static str, path: String },
    /// Path is readable but not part of the write whitelist.
    NotWritable { class: &'static str, path: String },
    /// Written value kind does not match the field.
    TypeMismatch {
        path: String,
        expected: &'static str,
    },
    /// Field holds no value where one is required (e.g. a primary key).
    EmptyValue(String),
}

impl Display for AccessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPath(path) => write!(f, "invalid field path: `{path}`"),
            Self::UnknownField { class, path } => {
                write!(f, "field `{path}` is not readable on `{class}`")
            }
            Self::NotWritable { class, path } => {
                write!(f, "field `{path}` is not writable on `{class}`")
            }
            Self::TypeMismatch { path, expected } => {
                write!(f, "field `{path}` expects a {expected} value")
            }
            Self::EmptyValue(path) => write!(f, "field `{path}` has no value"),
        }
    }
}

impl Error for AccessError {}

/// Generic read/write capability over one entity type.
pub trait FieldAccessor<E> {
    /// Reads one field value.
    fn read(&self, entity: &E, path: &str) -> AccessResult<FieldValue>;
    /// Writes one field value.
    fn write(&self, entity: &mut E, path: &str, value: FieldValue) -> AccessResult<()>;
}

impl<E, T: FieldAccessor<E> + ?Sized> FieldAccessor<E> for &T {
    fn read(&self, entity: &E, path: &str) -> AccessResult<FieldValue> {
        (**self).read(entity, path)
    }

    fn write(&self, entity: &mut E, path: &str, value: FieldValue) -> AccessResult<()> {
        (**self).write(entity, path, value)
    }
}

/// Class identity plus zero-argument constructor.
///
/// Stands in for dynamic instantiation: new tag objects are always built
/// through the factory registered here.
pub struct EntityClass<E> {
    name: &'static str,
    factory: fn() -> E,
}

impl<E> EntityClass<E> {
    pub const fn new(name: &'static str, factory: fn() -> E) -> Self {
        Self { name, factory }
    }

    /// Stable class name used for store lookups and diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Builds a blank instance.
    pub fn instantiate(&self) -> E {
        (self.factory)()
    }
}

impl<E> Clone for EntityClass<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for EntityClass<E> {}

impl<E> std::fmt::Debug for EntityClass<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityClass")
            .field("name", &self.name)
            .finish()
    }
}

/// Returns whether `path` is a dotted identifier path.
pub fn is_valid_field_path(path: &str) -> bool {
    FIELD_PATH_RE.is_match(path)
}

#[cfg(test)]
mod tests {
    use super::{is_valid_field_path, EntityClass};

    #[test]
    fn field_path_accepts_dotted_identifiers() {
        assert!(is_valid_field_path("id"));
        assert!(is_valid_field_path("author.display_name"));
        assert!(is_valid_field_path("_private"));
    }

    #[test]
    fn field_path_rejects_free_text() {
        assert!(!is_valid_field_path(""));
        assert!(!is_valid_field_path("name; DROP TABLE tags"));
        assert!(!is_valid_field_path("author..name"));
        assert!(!is_valid_field_path("1st"));
        assert!(!is_valid_field_path("name."));
    }

    #[test]
    fn entity_class_builds_from_factory() {
        let class = EntityClass::new("counter", || 0_u32);
        assert_eq!(class.name(), "counter");
        assert_eq!(class.instantiate(), 0);
    }
}
