//! Transformer configuration and per-field option resolution.
//!
//! # Responsibility
//! - Hold global tagging defaults loaded from JSON.
//! - Merge per-field overrides over global defaults.
//! - Validate the resulting transformer configuration.
//!
//! # Invariants
//! - The tag prefix is never empty.
//! - Primary-key and text field names are dotted identifiers.

use crate::access::is_valid_field_path;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_PRIMARY_KEY: &str = "id";
pub const DEFAULT_TAG_PREFIX: &str = "__";
pub const DEFAULT_TAG_TEXT: &str = " (NEW)";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyTagPrefix,
    EmptyPrimaryKey,
    InvalidFieldPath(String),
    /// Options name a class other than the one the transformer is built for.
    ClassMismatch {
        expected: String,
        found: String,
    },
    Parse(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTagPrefix => write!(f, "new tag prefix must not be empty"),
            Self::EmptyPrimaryKey => write!(f, "primary key field must not be empty"),
            Self::InvalidFieldPath(path) => write!(f, "invalid field path: `{path}`"),
            Self::ClassMismatch { expected, found } => {
                write!(f, "options target class `{found}`, expected `{expected}`")
            }
            Self::Parse(message) => write!(f, "invalid select config: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Settings shared by the single and collection transformers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformerConfig {
    /// Field holding the primary key. Defaults to `id`.
    pub primary_key: String,
    /// Field holding the display label. `None` falls back to `Display`.
    pub text_field: Option<String>,
    /// Reserved wire-key prefix marking unsaved tags.
    pub tag_prefix: String,
    /// Appended to an unsaved tag's label when rendering.
    pub tag_text: String,
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self {
            primary_key: DEFAULT_PRIMARY_KEY.to_string(),
            text_field: None,
            tag_prefix: DEFAULT_TAG_PREFIX.to_string(),
            tag_text: DEFAULT_TAG_TEXT.to_string(),
        }
    }
}

impl TransformerConfig {
    /// Default configuration reading labels from `text_field`.
    pub fn with_text_field(text_field: impl Into<String>) -> Self {
        Self {
            text_field: Some(text_field.into()),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tag_prefix.is_empty() {
            return Err(ConfigError::EmptyTagPrefix);
        }
        if self.primary_key.trim().is_empty() {
            return Err(ConfigError::EmptyPrimaryKey);
        }
        if !is_valid_field_path(&self.primary_key) {
            return Err(ConfigError::InvalidFieldPath(self.primary_key.clone()));
        }
        if let Some(text_field) = self.text_field.as_deref() {
            if !is_valid_field_path(text_field) {
                return Err(ConfigError::InvalidFieldPath(text_field.to_string()));
            }
        }
        Ok(())
    }
}

/// Global tagging defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowAddConfig {
    pub new_tag_prefix: String,
    pub new_tag_text: String,
}

impl Default for AllowAddConfig {
    fn default() -> Self {
        Self {
            new_tag_prefix: DEFAULT_TAG_PREFIX.to_string(),
            new_tag_text: DEFAULT_TAG_TEXT.to_string(),
        }
    }
}

/// Process-wide select configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    pub allow_add: AllowAddConfig,
}

impl SelectConfig {
    /// Parses configuration from JSON; missing keys take defaults.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(source).map_err(|err| ConfigError::Parse(err.to_string()))
    }
}

/// Per-field tagging overrides. `None` inherits the global value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowAddOverrides {
    pub new_tag_prefix: Option<String>,
    pub new_tag_text: Option<String>,
}

/// Options declared on one select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOptions {
    pub class: String,
    #[serde(default = "default_primary_key")]
    pub primary_key: String,
    #[serde(default)]
    pub text_property: Option<String>,
    #[serde(default)]
    pub multiple: bool,
    #[serde(default)]
    pub allow_add: AllowAddOverrides,
}

/// Field options merged with global defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    pub class: String,
    pub multiple: bool,
    pub transformer: TransformerConfig,
}

impl FieldOptions {
    /// Single-select options for `class` with default settings.
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            primary_key: default_primary_key(),
            text_property: None,
            multiple: false,
            allow_add: AllowAddOverrides::default(),
        }
    }

    /// Merges these options over `defaults` and validates the result.
    pub fn resolve(&self, defaults: &SelectConfig) -> Result<ResolvedField, ConfigError> {
        let transformer = TransformerConfig {
            primary_key: self.primary_key.clone(),
            text_field: self.text_property.clone(),
            tag_prefix: self
                .allow_add
                .new_tag_prefix
                .clone()
                .unwrap_or_else(|| defaults.allow_add.new_tag_prefix.clone()),
            tag_text: self
                .allow_add
                .new_tag_text
                .clone()
                .unwrap_or_else(|| defaults.allow_add.new_tag_text.clone()),
        };
        transformer.validate()?;

        Ok(ResolvedField {
            class: self.class.clone(),
            multiple: self.multiple,
            transformer,
        })
    }
}

fn default_primary_key() -> String {
    DEFAULT_PRIMARY_KEY.to_string()
}
