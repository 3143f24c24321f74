//! Runtime configuration shared by the FFI and CLI hosts.
//!
//! # Invariants
//! - `TRAVELBOOK_DB_PATH` wins when set to a non-blank value.
//! - Otherwise the store lives in the OS temp directory.

use std::path::PathBuf;

/// Environment variable overriding the place store location.
pub const DB_PATH_ENV: &str = "TRAVELBOOK_DB_PATH";

/// Default store file name under the temp directory.
pub const DEFAULT_DB_FILE_NAME: &str = "travelbook.sqlite3";

/// Resolves the place store path from the environment.
pub fn resolve_db_path() -> PathBuf {
    db_path_from(std::env::var(DB_PATH_ENV).ok().as_deref())
}

fn db_path_from(raw: Option<&str>) -> PathBuf {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
    }
}
