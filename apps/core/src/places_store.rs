use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{named_params, Connection, ErrorCode, OpenFlags, Row};

use crate::model::{Place, PlaceRow, MAX_RESULTS};
use crate::query_builder::QuerySpec;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Unavailable { path: PathBuf, message: String },
    Query(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable { path, message } => {
                write!(f, "places store unavailable at {}: {message}", path.display())
            }
            Self::Query(message) => write!(f, "places query failed: {message}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Opens the places database without ever taking a write lock; the browser
/// usually holds one while it is running.
pub fn open_read_only(path: &Path, busy_timeout_ms: u64) -> Result<Connection, StoreError> {
    if !path.is_file() {
        return Err(StoreError::Unavailable {
            path: path.to_path_buf(),
            message: "file does not exist".to_string(),
        });
    }

    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(path, flags).map_err(|e| unavailable(path, &e))?;
    conn.busy_timeout(Duration::from_millis(busy_timeout_ms))
        .map_err(|e| unavailable(path, &e))?;
    Ok(conn)
}

/// Runs `spec` against the store at `path` and returns at most
/// [`MAX_RESULTS`] rows in store order. The connection lives only for the
/// duration of this call.
pub fn fetch(
    spec: &QuerySpec,
    path: &Path,
    busy_timeout_ms: u64,
) -> Result<Vec<PlaceRow>, StoreError> {
    let conn = open_read_only(path, busy_timeout_ms)?;
    fetch_with_connection(&conn, spec).map_err(|error| classify_error(path, error))
}

pub fn fetch_with_connection(
    conn: &Connection,
    spec: &QuerySpec,
) -> Result<Vec<PlaceRow>, rusqlite::Error> {
    let mut stmt = conn.prepare(spec.template.sql())?;
    let mut rows = match spec.term.as_deref() {
        Some(term) => stmt.query(named_params! { ":term": term })?,
        None => stmt.query([])?,
    };

    let mut out = Vec::with_capacity(MAX_RESULTS);
    while let Some(row) = rows.next()? {
        out.push(read_row(row)?);
        if out.len() >= MAX_RESULTS {
            break;
        }
    }
    Ok(out)
}

pub fn normalize(row: PlaceRow) -> Result<Place, StoreError> {
    let url = row
        .url
        .ok_or_else(|| StoreError::Query("row is missing its url column value".to_string()))?;
    Ok(Place {
        title: row.title.unwrap_or_default(),
        url,
    })
}

pub fn normalize_all(rows: Vec<PlaceRow>) -> Result<Vec<Place>, StoreError> {
    rows.into_iter().map(normalize).collect()
}

fn read_row(row: &Row<'_>) -> Result<PlaceRow, rusqlite::Error> {
    Ok(PlaceRow {
        url: row.get("url")?,
        title: row.get("title")?,
        visit_count: row.get::<_, Option<i64>>("visit_count")?.unwrap_or(0),
    })
}

fn classify_error(path: &Path, error: rusqlite::Error) -> StoreError {
    if is_unavailable_code(error.sqlite_error_code()) {
        unavailable(path, &error)
    } else {
        StoreError::Query(error.to_string())
    }
}

fn is_unavailable_code(code: Option<ErrorCode>) -> bool {
    matches!(
        code,
        Some(
            ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::CannotOpen
                | ErrorCode::NotADatabase
                | ErrorCode::DatabaseCorrupt
                | ErrorCode::PermissionDenied
                | ErrorCode::SystemIoFailure
        )
    )
}

fn unavailable(path: &Path, error: &rusqlite::Error) -> StoreError {
    StoreError::Unavailable {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}
