//! Embedded SQLite store for saved places.
//!
//! The store is a single file (see `config::resolve_db_path`) or an
//! in-memory database for tests. It holds one table, `places`, keyed by the
//! place UUID; rows are append-only and read back in `rowid` order.
//!
//! # Invariants
//! - `PRAGMA user_version` equals the latest applied migration.
//! - A store stamped by a newer build is refused instead of being rewritten.
//! - Connections handed out here are fully migrated; repositories still
//!   re-check the `places` columns before use.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failures while locating, opening or migrating the place store.
#[derive(Debug)]
pub enum DbError {
    /// The store's parent directory could not be created.
    Io(std::io::Error),
    Sqlite(rusqlite::Error),
    /// The file was written by a build with more migrations than this one.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cannot prepare place store directory: {err}"),
            Self::Sqlite(err) => write!(f, "place store error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "place store was written by a newer build (schema {db_version}, this build supports up to {latest_supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<std::io::Error> for DbError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
