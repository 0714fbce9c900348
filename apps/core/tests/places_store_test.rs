mod common;

use places_search_core::model::MAX_RESULTS;
use places_search_core::places_store::{self, StoreError};
use places_search_core::query_builder::{QuerySpec, QueryTemplate};

fn spec(template: QueryTemplate, term: Option<&str>) -> QuerySpec {
    QuerySpec {
        template,
        term: term.map(str::to_string),
    }
}

#[test]
fn rows_come_back_by_descending_visit_count() {
    let dir = common::unique_dir("store-order");
    let path = dir.join("places.sqlite");
    let conn = common::create_places_db(&path);
    common::insert_place(&conn, 1, "https://a.example", Some("A"), 5);
    common::insert_place(&conn, 2, "https://b.example", Some("B"), 40);
    common::insert_place(&conn, 3, "https://c.example", Some("C"), 1);
    common::insert_place(&conn, 4, "https://d.example", Some("D"), 17);
    for id in [3, 1, 4, 2] {
        common::bookmark(&conn, id);
    }

    let rows = places_store::fetch(&spec(QueryTemplate::BookmarksTop, None), &path, 0).unwrap();
    let visits: Vec<i64> = rows.iter().map(|r| r.visit_count).collect();
    assert_eq!(visits, vec![40, 17, 5, 1]);

    drop(conn);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn result_count_is_capped() {
    let dir = common::unique_dir("store-cap");
    let path = dir.join("places.sqlite");
    let conn = common::create_places_db(&path);
    for id in 1..=35 {
        common::insert_place(&conn, id, &format!("https://site{id}.example"), None, id);
    }

    let rows = places_store::fetch(&spec(QueryTemplate::HistoryTop, None), &path, 0).unwrap();
    assert_eq!(rows.len(), MAX_RESULTS);
    assert_eq!(rows[0].visit_count, 35);
    assert_eq!(rows[MAX_RESULTS - 1].visit_count, 16);

    drop(conn);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn bookmark_templates_skip_unbookmarked_places_and_folders() {
    let dir = common::unique_dir("store-bookmarks");
    let path = dir.join("places.sqlite");
    let conn = common::create_places_db(&path);
    common::insert_place(&conn, 1, "https://docs.rs", Some("Docs.rs"), 9);
    common::insert_place(&conn, 2, "https://doc.rust-lang.org", Some("Rust docs"), 30);
    common::bookmark(&conn, 1);
    common::bookmark_folder(&conn);

    let bookmarks =
        places_store::fetch(&spec(QueryTemplate::BookmarksFiltered, Some("doc")), &path, 0)
            .unwrap();
    assert_eq!(bookmarks.len(), 1);
    assert_eq!(bookmarks[0].url.as_deref(), Some("https://docs.rs"));

    let history =
        places_store::fetch(&spec(QueryTemplate::HistoryFiltered, Some("doc")), &path, 0)
            .unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].url.as_deref(), Some("https://doc.rust-lang.org"));

    drop(conn);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn filter_matches_url_or_title_ignoring_case() {
    let dir = common::unique_dir("store-filter");
    let path = dir.join("places.sqlite");
    let conn = common::create_places_db(&path);
    common::insert_place(&conn, 1, "https://GitHub.com", None, 3);
    common::insert_place(&conn, 2, "https://example.org", Some("My GITHUB mirror"), 2);
    common::insert_place(&conn, 3, "https://gitlab.com", Some("GitLab"), 8);

    let rows =
        places_store::fetch(&spec(QueryTemplate::HistoryFiltered, Some("github")), &path, 0)
            .unwrap();
    let urls: Vec<String> = rows.into_iter().filter_map(|r| r.url).collect();
    assert_eq!(urls, vec!["https://GitHub.com", "https://example.org"]);

    drop(conn);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn wildcard_and_quote_characters_match_literally() {
    let dir = common::unique_dir("store-literal");
    let path = dir.join("places.sqlite");
    let conn = common::create_places_db(&path);
    common::insert_place(&conn, 1, "https://a.example/?q=100%25", Some("100% done"), 1);
    common::insert_place(&conn, 2, "https://b.example", Some("anything"), 2);
    common::insert_place(&conn, 3, "https://c.example", Some("it's here"), 3);

    let percent =
        places_store::fetch(&spec(QueryTemplate::HistoryFiltered, Some("%")), &path, 0).unwrap();
    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].title.as_deref(), Some("100% done"));

    let quote =
        places_store::fetch(&spec(QueryTemplate::HistoryFiltered, Some("it's")), &path, 0)
            .unwrap();
    assert_eq!(quote.len(), 1);

    let injection = places_store::fetch(
        &spec(QueryTemplate::HistoryFiltered, Some("' OR 1=1 --")),
        &path,
        0,
    )
    .unwrap();
    assert!(injection.is_empty());

    drop(conn);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn null_title_is_read_as_none_and_normalized_to_empty() {
    let dir = common::unique_dir("store-null-title");
    let path = dir.join("places.sqlite");
    let conn = common::create_places_db(&path);
    common::insert_place(&conn, 1, "https://github.com", None, 1);

    let rows = places_store::fetch(&spec(QueryTemplate::HistoryTop, None), &path, 0).unwrap();
    assert_eq!(rows[0].title, None);

    let places = places_store::normalize_all(rows).unwrap();
    assert_eq!(places[0].title, "");
    assert_eq!(places[0].url, "https://github.com");

    drop(conn);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_store_file_is_unavailable() {
    let dir = common::unique_dir("store-missing");
    let path = dir.join("places.sqlite");

    let result = places_store::fetch(&spec(QueryTemplate::BookmarksTop, None), &path, 0);
    assert!(matches!(result, Err(StoreError::Unavailable { .. })));
    assert!(!path.exists(), "read-only open must not create the store");

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn non_database_file_is_unavailable() {
    let dir = common::unique_dir("store-garbage");
    let path = dir.join("places.sqlite");
    std::fs::write(&path, vec![0x42_u8; 4096]).unwrap();

    let result = places_store::fetch(&spec(QueryTemplate::BookmarksTop, None), &path, 0);
    assert!(matches!(result, Err(StoreError::Unavailable { .. })));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn unexpected_schema_is_a_query_error() {
    let dir = common::unique_dir("store-schema");
    let path = dir.join("places.sqlite");
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch("CREATE TABLE unrelated (id INTEGER PRIMARY KEY);")
        .unwrap();

    let result = places_store::fetch(&spec(QueryTemplate::HistoryTop, None), &path, 0);
    assert!(matches!(result, Err(StoreError::Query(_))));

    drop(conn);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn exclusively_locked_store_is_unavailable() {
    let dir = common::unique_dir("store-locked");
    let path = dir.join("places.sqlite");
    let conn = common::create_places_db(&path);
    common::insert_place(&conn, 1, "https://locked.example", None, 1);
    conn.execute_batch("BEGIN EXCLUSIVE;").unwrap();

    let result = places_store::fetch(&spec(QueryTemplate::HistoryTop, None), &path, 0);
    assert!(matches!(result, Err(StoreError::Unavailable { .. })));

    conn.execute_batch("COMMIT;").unwrap();
    let rows = places_store::fetch(&spec(QueryTemplate::HistoryTop, None), &path, 0).unwrap();
    assert_eq!(rows.len(), 1);

    drop(conn);
    std::fs::remove_dir_all(&dir).unwrap();
}
