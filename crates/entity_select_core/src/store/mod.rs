//! Object store contracts and reference implementations.
//!
//! # Responsibility
//! - Resolve wire keys to persisted objects in one batch call.
//! - Report whether an object is already persisted.
//!
//! # Invariants
//! - `find_by_keys` is a single round trip regardless of key count.
//! - Keys passed to `find_by_keys` are unique.
//! - Result order is store-defined; callers must not rely on request order.
//!
//! # See also
//! - `crate::transformer` for the consumers of this contract.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite_schema;
pub mod sqlite_tag;

pub use memory::MemoryObjectStore;
pub use sqlite_schema::{install_tag_schema, open_tag_db, open_tag_db_in_memory};
pub use sqlite_tag::SqliteTagStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Object store failures.
#[derive(Debug)]
pub enum StoreError {
    /// Store does not manage the requested class.
    UnknownClass(String),
    /// Requested primary-key field is not a lookup column.
    UnsupportedKeyField { class: String, field: String },
    /// Database carries a newer tag schema than this build understands.
    SchemaTooNew { found: u32, supported: u32 },
    Sqlite(rusqlite::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownClass(class) => write!(f, "store does not manage class `{class}`"),
            Self::UnsupportedKeyField { class, field } => {
                write!(f, "field `{field}` is not a key column of `{class}`")
            }
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "tag schema version {found} is newer than supported {supported}"
            ),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Narrow resolve-by-keys contract consumed by transformers.
pub trait ObjectStore<E> {
    /// Returns every persisted object of `class` whose `primary_key` field
    /// matches one of `keys`.
    fn find_by_keys(&self, class: &str, primary_key: &str, keys: &[String])
        -> StoreResult<Vec<E>>;
    /// Returns whether `entity` is already persisted.
    fn is_persisted(&self, entity: &E) -> StoreResult<bool>;
}

impl<E, T: ObjectStore<E> + ?Sized> ObjectStore<E> for &T {
    fn find_by_keys(
        &self,
        class: &str,
        primary_key: &str,
        keys: &[String],
    ) -> StoreResult<Vec<E>> {
        (**self).find_by_keys(class, primary_key, keys)
    }

    fn is_persisted(&self, entity: &E) -> StoreResult<bool> {
        (**self).is_persisted(entity)
    }
}
