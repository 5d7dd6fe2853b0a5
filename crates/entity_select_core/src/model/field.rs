//! Generic field values.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// One field value read from or written to a domain object.
///
/// Accessors convert typed struct fields to this shape so that transformers
/// can stay agnostic of the concrete entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Text(String),
    Integer(i64),
    Uuid(Uuid),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the borrowed text when this value is `Text`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

/// Renders the value as it appears on the wire.
///
/// `Null` renders as an empty string.
impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Text(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Uuid(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::FieldValue;
    use uuid::Uuid;

    #[test]
    fn renders_wire_text() {
        assert_eq!(FieldValue::Integer(42).to_string(), "42");
        assert_eq!(FieldValue::from("rust").to_string(), "rust");
        assert_eq!(FieldValue::Null.to_string(), "");

        let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
        assert_eq!(
            FieldValue::from(id).to_string(),
            "11111111-2222-4333-8444-555555555555"
        );
    }

    #[test]
    fn option_none_maps_to_null() {
        let value: FieldValue = Option::<i64>::None.into();
        assert!(value.is_null());
        assert_eq!(FieldValue::from(Some(7_i64)), FieldValue::Integer(7));
    }
}
