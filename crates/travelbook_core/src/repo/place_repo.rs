//! Place repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create / fetch-all / fetch-by-id over the `places` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `Place::validate()` before any SQL mutation.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Fetch-all returns rows in insertion order (`rowid`).

use crate::db::migrations::latest_version;
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::place::{Coordinate, Place, PlaceId, PlaceSummary, PlaceValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

const PLACES_TABLE: &str = "places";
const REQUIRED_PLACE_COLUMNS: &[&str] = &["id", "title", "subtitle", "latitude", "longitude"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for place store reads and writes.
#[derive(Debug)]
pub enum RepoError {
    Validation(PlaceValidationError),
    Db(DbError),
    InvalidData(String),
    /// The connection was not opened through `db::open_db*`.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// The connection lock was poisoned by a panic in another caller.
    StoreUnavailable,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted place data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "place store schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
            Self::StoreUnavailable => write!(f, "place store is unavailable"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PlaceValidationError> for RepoError {
    fn from(value: PlaceValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for place persistence.
///
/// There is intentionally no update or delete: saved places are immutable.
pub trait PlaceRepository {
    fn create_place(&self, place: &Place) -> RepoResult<PlaceId>;
    fn list_places(&self) -> RepoResult<Vec<PlaceSummary>>;
    fn get_place(&self, id: PlaceId) -> RepoResult<Option<Place>>;
}

/// SQLite-backed place repository.
///
/// Owns the store connection; the mutex serializes every statement so the
/// repository can be shared across screens through `Arc`.
pub struct SqlitePlaceRepository {
    conn: Mutex<Connection>,
}

impl SqlitePlaceRepository {
    /// Wraps a connection after checking it carries the current schema.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` for a foreign schema.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        ensure_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens the store file at `path`, applying migrations.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::try_new(open_db(path)?)
    }

    /// Opens a fresh in-memory store.
    pub fn open_in_memory() -> RepoResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    fn conn(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| RepoError::StoreUnavailable)
    }
}

impl PlaceRepository for SqlitePlaceRepository {
    fn create_place(&self, place: &Place) -> RepoResult<PlaceId> {
        place.validate()?;

        self.conn()?.execute(
            "INSERT INTO places (id, title, subtitle, latitude, longitude)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                place.id.to_string(),
                place.title.as_str(),
                place.subtitle.as_str(),
                place.coordinate.latitude,
                place.coordinate.longitude,
            ],
        )?;

        Ok(place.id)
    }

    fn list_places(&self) -> RepoResult<Vec<PlaceSummary>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, title, subtitle FROM places ORDER BY rowid ASC;")?;
        let mut rows = stmt.query([])?;
        let mut places = Vec::new();

        while let Some(row) = rows.next()? {
            let title: String = row.get("title")?;
            if title.trim().is_empty() {
                return Err(RepoError::InvalidData(
                    "empty title in places.title".to_string(),
                ));
            }
            places.push(PlaceSummary {
                id: parse_place_id(row)?,
                title,
                subtitle: row.get("subtitle")?,
            });
        }

        Ok(places)
    }

    fn get_place(&self, id: PlaceId) -> RepoResult<Option<Place>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, subtitle, latitude, longitude
             FROM places
             WHERE id = ?1
             LIMIT 1;",
        )?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_place_row(row)?));
        }

        Ok(None)
    }
}

fn ensure_schema(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [PLACES_TABLE],
        |row| row.get(0),
    )?;
    if !table_exists {
        return Err(RepoError::MissingRequiredTable(PLACES_TABLE));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([PLACES_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    for &column in REQUIRED_PLACE_COLUMNS {
        if !columns.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: PLACES_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn parse_place_id(row: &Row<'_>) -> RepoResult<PlaceId> {
    let id_text: String = row.get("id")?;
    Uuid::parse_str(&id_text)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{id_text}` in places.id")))
}

fn parse_place_row(row: &Row<'_>) -> RepoResult<Place> {
    let place = Place::with_id(
        parse_place_id(row)?,
        row.get::<_, String>("title")?,
        row.get::<_, String>("subtitle")?,
        Coordinate::new(row.get("latitude")?, row.get("longitude")?),
    );
    place
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("place {}: {err}", place.id)))?;
    Ok(place)
}
