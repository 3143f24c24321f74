//! Headless screen state machines.
//!
//! # Responsibility
//! - Hold the list and detail screen state the host UI renders.
//! - Route user actions to the place service, the change channel and the
//!   host navigator.
//!
//! # Invariants
//! - Screens receive every collaborator at construction; no global lookups.
//! - Errors are logged at the failing operation; screen state stays as it was.

pub mod detail_screen;
pub mod list_screen;
pub mod route;
