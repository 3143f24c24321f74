//! Repository layer for the place store.
//!
//! # Responsibility
//! - Define the data access contract the service layer depends on.
//! - Isolate SQLite query details from screens and service orchestration.
//!
//! # Invariants
//! - Repository writes enforce `Place::validate()` before persistence.
//! - A missing place is `Ok(None)`, never an error.

pub mod place_repo;
