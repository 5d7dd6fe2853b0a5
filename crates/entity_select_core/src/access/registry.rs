//! Whitelist-based field accessor.

use super::{is_valid_field_path, AccessError, AccessResult, FieldAccessor};
use crate::model::field::FieldValue;
use std::collections::BTreeMap;

type Reader<E> = fn(&E) -> FieldValue;
type Writer<E> = fn(&mut E, FieldValue) -> AccessResult<()>;

/// Explicit per-class field registry.
///
/// Readers and writers are registered by path; a path never registered as
/// writable cannot be written, even if it is readable.
pub struct FieldRegistry<E> {
    class: &'static str,
    readers: BTreeMap<&'static str, Reader<E>>,
    writers: BTreeMap<&'static str, Writer<E>>,
}

impl<E> FieldRegistry<E> {
    pub fn new(class: &'static str) -> Self {
        Self {
            class,
            readers: BTreeMap::new(),
            writers: BTreeMap::new(),
        }
    }

    /// Registers one readable field.
    ///
    /// # Panics
    /// Panics when `path` is not a dotted identifier. Registration happens
    /// at startup with literal paths, so this is a programming error.
    pub fn readable(mut self, path: &'static str, reader: Reader<E>) -> Self {
        assert!(is_valid_field_path(path), "invalid field path `{path}`");
        self.readers.insert(path, reader);
        self
    }

    /// Adds one field to the write whitelist.
    ///
    /// # Panics
    /// Panics when `path` is not a dotted identifier.
    pub fn writable(mut self, path: &'static str, writer: Writer<E>) -> Self {
        assert!(is_valid_field_path(path), "invalid field path `{path}`");
        self.writers.insert(path, writer);
        self
    }

    pub fn class(&self) -> &'static str {
        self.class
    }

    pub fn is_readable(&self, path: &str) -> bool {
        self.readers.contains_key(path)
    }

    pub fn is_writable(&self, path: &str) -> bool {
        self.writers.contains_key(path)
    }

    fn check_path(&self, path: &str) -> AccessResult<()> {
        if is_valid_field_path(path) {
            Ok(())
        } else {
            Err(AccessError::InvalidPath(path.to_string()))
        }
    }
}

impl<E> FieldAccessor<E> for FieldRegistry<E> {
    fn read(&self, entity: &E, path: &str) -> AccessResult<FieldValue> {
        self.check_path(path)?;
        let reader = self
            .readers
            .get(path)
            .ok_or_else(|| AccessError::UnknownField {
                class: self.class,
                path: path.to_string(),
            })?;
        Ok(reader(entity))
    }

    fn write(&self, entity: &mut E, path: &str, value: FieldValue) -> AccessResult<()> {
        self.check_path(path)?;
        let writer = self.writers.get(path).ok_or_else(|| {
            if self.readers.contains_key(path) {
                AccessError::NotWritable {
                    class: self.class,
                    path: path.to_string(),
                }
            } else {
                AccessError::UnknownField {
                    class: self.class,
                    path: path.to_string(),
                }
            }
        })?;
        writer(entity, value)
    }
}

#[cfg(test)]
mod tests {
    use super::FieldRegistry;
    use crate::access::{AccessError, FieldAccessor};
    use crate::model::field::FieldValue;

    #[derive(Debug, Default)]
    struct Label {
        id: i64,
        title: String,
    }

    fn registry() -> FieldRegistry<Label> {
        FieldRegistry::<Label>::new("label")
            .readable("id", |label| FieldValue::Integer(label.id))
            .readable("title", |label| FieldValue::from(label.title.as_str()))
            .writable("title", |label, value| match value {
                FieldValue::Text(text) => {
                    label.title = text;
                    Ok(())
                }
                _ => Err(AccessError::TypeMismatch {
                    path: "title".to_string(),
                    expected: "text",
                }),
            })
    }

    #[test]
    fn reads_and_writes_whitelisted_fields() {
        let registry = registry();
        let mut label = Label::default();
        registry
            .write(&mut label, "title", FieldValue::from("urgent"))
            .unwrap();
        assert_eq!(
            registry.read(&label, "title").unwrap(),
            FieldValue::from("urgent")
        );
        assert_eq!(registry.read(&label, "id").unwrap(), FieldValue::Integer(0));
    }

    #[test]
    fn readable_only_field_is_not_writable() {
        let registry = registry();
        let mut label = Label::default();
        let err = registry
            .write(&mut label, "id", FieldValue::Integer(9))
            .unwrap_err();
        assert_eq!(
            err,
            AccessError::NotWritable {
                class: "label",
                path: "id".to_string()
            }
        );
        assert_eq!(label.id, 0);
    }

    #[test]
    fn unknown_and_malformed_paths_fail() {
        let registry = registry();
        let label = Label::default();
        assert!(matches!(
            registry.read(&label, "color"),
            Err(AccessError::UnknownField { .. })
        ));
        assert!(matches!(
            registry.read(&label, "title[0]"),
            Err(AccessError::InvalidPath(_))
        ));
    }

    #[test]
    fn writer_rejects_wrong_value_kind() {
        let registry = registry();
        let mut label = Label::default();
        let err = registry
            .write(&mut label, "title", FieldValue::Integer(1))
            .unwrap_err();
        assert!(matches!(err, AccessError::TypeMismatch { .. }));
    }
}
