//! Place use-case service.
//!
//! # Responsibility
//! - Translate screen-level calls into place store operations.
//! - Emit metadata-only diagnostics for every store round-trip.
//!
//! # Invariants
//! - The service owns no state beyond its repository handle.
//! - IDs are generated here, never supplied by callers.
//! - Failures are returned unchanged; the service never retries.

use crate::model::place::{Coordinate, Place, PlaceId, PlaceSummary};
use crate::repo::place_repo::{PlaceRepository, RepoResult};
use log::{debug, error, info};

/// Façade over a place repository implementation.
pub struct PlaceService<R: PlaceRepository> {
    repo: R,
}

impl<R: PlaceRepository> PlaceService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new place and returns its freshly generated ID.
    ///
    /// # Errors
    /// - `RepoError::Validation` for a blank title or invalid coordinate.
    /// - `RepoError::Db` when the write fails.
    pub fn create_place(
        &self,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        coordinate: Coordinate,
    ) -> RepoResult<PlaceId> {
        let place = Place::new(title, subtitle, coordinate);
        match self.repo.create_place(&place) {
            Ok(place_id) => {
                info!("event=place_create module=service status=ok place_id={place_id}");
                Ok(place_id)
            }
            Err(err) => {
                error!("event=place_create module=service status=error error={err}");
                Err(err)
            }
        }
    }

    /// Returns every saved place as a list row, in store-native order.
    pub fn fetch_all_places(&self) -> RepoResult<Vec<PlaceSummary>> {
        match self.repo.list_places() {
            Ok(places) => {
                debug!(
                    "event=place_fetch_all module=service status=ok count={}",
                    places.len()
                );
                Ok(places)
            }
            Err(err) => {
                error!("event=place_fetch_all module=service status=error error={err}");
                Err(err)
            }
        }
    }

    /// Returns the place with `id`, or `None` when nothing matches.
    pub fn fetch_place(&self, id: PlaceId) -> RepoResult<Option<Place>> {
        let result = self.repo.get_place(id);
        match &result {
            Ok(Some(_)) => debug!("event=place_fetch module=service status=ok place_id={id}"),
            Ok(None) => debug!("event=place_fetch module=service status=not_found place_id={id}"),
            Err(err) => error!(
                "event=place_fetch module=service status=error place_id={id} error={err}"
            ),
        }
        result
    }
}
