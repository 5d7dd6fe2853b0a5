//! Core of an entity selection widget.
//! Converts domain objects to compact wire keys and back, creating new
//! objects inline from free-text tags.

pub mod access;
pub mod config;
pub mod logging;
pub mod model;
pub mod store;
pub mod transformer;

pub use access::{AccessError, AccessResult, EntityClass, FieldAccessor, FieldRegistry};
pub use config::{
    AllowAddConfig, AllowAddOverrides, ConfigError, FieldOptions, ResolvedField, SelectConfig,
    TransformerConfig,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::field::FieldValue;
pub use model::tag::{Tag, TAG_CLASS};
pub use store::{
    install_tag_schema, open_tag_db, open_tag_db_in_memory, MemoryObjectStore, ObjectStore,
    SqliteTagStore, StoreError, StoreResult,
};
pub use transformer::{
    CollectionTransformer, SelectTransformer, SingleTransformer, TagPolicy, TransformError,
    TransformResult, WireEntry, WireMap,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
