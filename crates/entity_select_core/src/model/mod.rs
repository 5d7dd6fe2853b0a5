//! Domain values exchanged between selection widgets and object stores.
//!
//! # Responsibility
//! - Define the generic field value shape read/written by accessors.
//! - Provide the `Tag` entity used by the SQLite reference store.
//!
//! # Invariants
//! - Field values render to wire keys through their string conversion.
//! - A domain object is identified by one primary-key field.

pub mod field;
pub mod tag;
