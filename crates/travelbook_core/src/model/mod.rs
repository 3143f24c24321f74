//! Domain model for saved places.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep list rows and detail views projected from one `Place` shape.
//!
//! # Invariants
//! - Every place is identified by a stable `PlaceId`.
//! - Places are immutable once persisted: there is no update or delete path.

pub mod place;
