#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, Connection};

pub fn unique_dir(label: &str) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "places-search-{label}-{}-{unique}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be created");
    dir
}

pub fn create_places_db(path: &Path) -> Connection {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("parent dir should be created");
    }
    let conn = Connection::open(path).expect("places db should open");
    conn.execute_batch(
        "CREATE TABLE moz_places (
            id INTEGER PRIMARY KEY,
            url LONGVARCHAR NOT NULL,
            title LONGVARCHAR,
            visit_count INTEGER DEFAULT 0
         );
         CREATE TABLE moz_bookmarks (
            id INTEGER PRIMARY KEY,
            type INTEGER,
            fk INTEGER DEFAULT NULL,
            title LONGVARCHAR
         );",
    )
    .expect("places schema should be created");
    conn
}

pub fn insert_place(conn: &Connection, id: i64, url: &str, title: Option<&str>, visits: i64) {
    conn.execute(
        "INSERT INTO moz_places (id, url, title, visit_count) VALUES (?1, ?2, ?3, ?4)",
        params![id, url, title, visits],
    )
    .expect("place should insert");
}

pub fn bookmark(conn: &Connection, place_id: i64) {
    conn.execute(
        "INSERT INTO moz_bookmarks (type, fk) VALUES (1, ?1)",
        params![place_id],
    )
    .expect("bookmark should insert");
}

/// A bookmark folder row: no place behind it.
pub fn bookmark_folder(conn: &Connection) {
    conn.execute(
        "INSERT INTO moz_bookmarks (type, fk, title) VALUES (2, NULL, 'toolbar')",
        [],
    )
    .expect("folder should insert");
}

/// Creates `<root>/<profile>/places.sqlite` with the places schema.
pub fn profile_with_store(root: &Path, profile: &str) -> (PathBuf, Connection) {
    let path = root.join(profile).join("places.sqlite");
    let conn = create_places_db(&path);
    (path, conn)
}
