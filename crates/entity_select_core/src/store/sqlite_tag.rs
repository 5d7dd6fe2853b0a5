//! SQLite-backed tag store.
//!
//! # Responsibility
//! - Resolve tag keys with one `IN (...)` query.
//! - Persist tags materialized from free-text input.
//!
//! # Invariants
//! - Lookup columns are restricted to `TAG_KEY_COLUMNS`; no caller text is
//!   ever spliced into SQL.
//! - Integer keys that do not parse are simply unmatched.

use super::{ObjectStore, StoreError, StoreResult};
use crate::model::tag::{Tag, TAG_CLASS};
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const TAG_SELECT_SQL: &str = "SELECT id, name FROM tags";
const TAG_KEY_COLUMNS: &[&str] = &["id", "name"];

/// Tag store over a connection carrying the tag schema.
pub struct SqliteTagStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTagStore<'conn> {
    /// Constructs a store after checking the `tags` table exists.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = 'tags'
            );",
            [],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(StoreError::UnknownClass(TAG_CLASS.to_string()));
        }
        Ok(Self { conn })
    }

    /// Inserts an unsaved tag and returns it with its assigned id.
    ///
    /// An already-saved tag is returned unchanged.
    pub fn insert_tag(&self, tag: &Tag) -> StoreResult<Tag> {
        if tag.id.is_some() {
            return Ok(tag.clone());
        }
        self.conn
            .execute("INSERT INTO tags (name) VALUES (?1);", params![tag.name])?;
        Ok(Tag::with_id(self.conn.last_insert_rowid(), tag.name.clone()))
    }
}

impl ObjectStore<Tag> for SqliteTagStore<'_> {
    fn find_by_keys(
        &self,
        class: &str,
        primary_key: &str,
        keys: &[String],
    ) -> StoreResult<Vec<Tag>> {
        if class != TAG_CLASS {
            return Err(StoreError::UnknownClass(class.to_string()));
        }
        let column = TAG_KEY_COLUMNS
            .iter()
            .copied()
            .find(|column| *column == primary_key)
            .ok_or_else(|| StoreError::UnsupportedKeyField {
                class: class.to_string(),
                field: primary_key.to_string(),
            })?;

        let bind_values: Vec<Value> = if column == "id" {
            keys.iter()
                .filter_map(|key| key.parse::<i64>().ok())
                .map(Value::Integer)
                .collect()
        } else {
            keys.iter().cloned().map(Value::Text).collect()
        };
        if bind_values.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; bind_values.len()].join(", ");
        let sql = format!("{TAG_SELECT_SQL} WHERE {column} IN ({placeholders}) ORDER BY id ASC");
        debug!(
            "event=store_find module=store status=start class={class} column={column} keys={}",
            bind_values.len()
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            tags.push(parse_tag_row(row)?);
        }
        Ok(tags)
    }

    fn is_persisted(&self, entity: &Tag) -> StoreResult<bool> {
        let Some(id) = entity.id else {
            return Ok(false);
        };
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM tags WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

fn parse_tag_row(row: &Row<'_>) -> rusqlite::Result<Tag> {
    Ok(Tag::with_id(row.get("id")?, row.get::<_, String>("name")?))
}
