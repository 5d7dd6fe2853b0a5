//! Tag table bootstrap for the SQLite store.
//!
//! The schema version lives in `PRAGMA user_version`. A database written
//! by a newer schema is refused instead of being queried blindly.

use super::{StoreError, StoreResult};
use log::{error, info};
use rusqlite::Connection;
use std::cmp::Ordering;
use std::path::Path;
use std::time::{Duration, Instant};

/// Schema version written by `install_tag_schema`.
pub const TAG_SCHEMA_VERSION: u32 = 1;

const TAG_SCHEMA_SQL: &str = include_str!("tag_schema.sql");

/// Opens a tag database file, installing the schema when missing.
pub fn open_tag_db(path: impl AsRef<Path>) -> StoreResult<Connection> {
    open_logged("file", || Connection::open(path))
}

/// Opens a throwaway in-memory tag database.
pub fn open_tag_db_in_memory() -> StoreResult<Connection> {
    open_logged("memory", Connection::open_in_memory)
}

/// Creates the `tags` table on an older or empty database.
///
/// # Errors
/// - `SchemaTooNew` when `user_version` exceeds `TAG_SCHEMA_VERSION`.
pub fn install_tag_schema(conn: &mut Connection) -> StoreResult<()> {
    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    match found.cmp(&TAG_SCHEMA_VERSION) {
        Ordering::Greater => Err(StoreError::SchemaTooNew {
            found,
            supported: TAG_SCHEMA_VERSION,
        }),
        Ordering::Equal => Ok(()),
        Ordering::Less => {
            let tx = conn.transaction()?;
            tx.execute_batch(TAG_SCHEMA_SQL)?;
            tx.pragma_update(None, "user_version", TAG_SCHEMA_VERSION)?;
            tx.commit()?;
            info!(
                "event=tag_schema_install module=store status=ok from={found} to={TAG_SCHEMA_VERSION}"
            );
            Ok(())
        }
    }
}

fn open_logged(
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> StoreResult<Connection> {
    let started_at = Instant::now();
    let result = connect().map_err(StoreError::from).and_then(|mut conn| {
        conn.busy_timeout(Duration::from_secs(5))?;
        install_tag_schema(&mut conn)?;
        Ok(conn)
    });

    match &result {
        Ok(_) => info!(
            "event=tag_db_open module=store status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=tag_db_open module=store status=error mode={mode} duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}
