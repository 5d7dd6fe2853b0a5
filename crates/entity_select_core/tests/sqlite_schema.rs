use entity_select_core::store::sqlite_schema::TAG_SCHEMA_VERSION;
use entity_select_core::{
    install_tag_schema, open_tag_db, open_tag_db_in_memory, ObjectStore, SqliteTagStore,
    StoreError, Tag, TAG_CLASS,
};
use rusqlite::Connection;
use tempfile::TempDir;

fn user_version(conn: &Connection) -> u32 {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .unwrap()
}

#[test]
fn open_in_memory_installs_tag_schema() {
    let conn = open_tag_db_in_memory().unwrap();
    assert_eq!(user_version(&conn), TAG_SCHEMA_VERSION);
    assert!(SqliteTagStore::try_new(&conn).is_ok());
}

#[test]
fn reopening_file_keeps_rows_and_version() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tags.sqlite3");

    let saved = {
        let conn = open_tag_db(&path).unwrap();
        let store = SqliteTagStore::try_new(&conn).unwrap();
        store.insert_tag(&Tag::new("rust")).unwrap()
    };

    let conn = open_tag_db(&path).unwrap();
    assert_eq!(user_version(&conn), TAG_SCHEMA_VERSION);
    let store = SqliteTagStore::try_new(&conn).unwrap();
    let found = store
        .find_by_keys(TAG_CLASS, "id", &[saved.id.unwrap().to_string()])
        .unwrap();
    assert_eq!(found, vec![saved]);
}

#[test]
fn install_on_plain_connection_enables_store() {
    let mut conn = Connection::open_in_memory().unwrap();
    assert!(SqliteTagStore::try_new(&conn).is_err());

    install_tag_schema(&mut conn).unwrap();
    install_tag_schema(&mut conn).unwrap();

    assert_eq!(user_version(&conn), TAG_SCHEMA_VERSION);
    assert!(SqliteTagStore::try_new(&conn).is_ok());
}

#[test]
fn newer_schema_version_is_refused() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.pragma_update(None, "user_version", TAG_SCHEMA_VERSION + 1)
        .unwrap();

    let err = install_tag_schema(&mut conn).unwrap_err();
    match err {
        StoreError::SchemaTooNew { found, supported } => {
            assert_eq!(found, TAG_SCHEMA_VERSION + 1);
            assert_eq!(supported, TAG_SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn newer_schema_file_fails_to_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("future.sqlite3");
    {
        let conn = Connection::open(&path).unwrap();
        conn.pragma_update(None, "user_version", TAG_SCHEMA_VERSION + 3)
            .unwrap();
    }

    let err = open_tag_db(&path).err().expect("open should fail");
    assert!(matches!(err, StoreError::SchemaTooNew { .. }));
}
