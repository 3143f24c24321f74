//! Core domain logic for TravelBook.
//! This crate is the single source of truth for place invariants and the
//! list/detail screen flows.

pub mod config;
pub mod db;
pub mod event;
pub mod logging;
pub mod map;
pub mod model;
pub mod platform;
pub mod repo;
pub mod service;
pub mod ui;

pub use event::{ChangeChannel, Subscription, Topic};
pub use logging::{default_log_level, init_logging, logging_status};
pub use map::{Annotation, AnnotationKind, LongPress, MapState, Region, LONG_PRESS_MIN_DURATION};
pub use model::place::{Coordinate, Place, PlaceId, PlaceSummary, PlaceValidationError};
pub use platform::{
    DirectionsHandoff, GeocodeError, Geocoder, LocationService, Navigator, PermissionDenied,
    Placemark, PlatformServices, TravelMode,
};
pub use repo::place_repo::{PlaceRepository, RepoError, RepoResult, SqlitePlaceRepository};
pub use service::place_service::PlaceService;
pub use ui::detail_screen::{DetailMode, DetailScreen, SaveError, ViewedPlace};
pub use ui::list_screen::ListScreen;
pub use ui::route::DetailRoute;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
