//! Place domain model.
//!
//! # Responsibility
//! - Define the canonical record behind list rows and map annotations.
//! - Validate user-supplied title and captured coordinate before persistence.
//!
//! # Invariants
//! - `id` is stable and never reused for another place.
//! - `title` is non-empty after trimming; `subtitle` may be empty.
//! - `coordinate` is finite and inside WGS84 latitude/longitude bounds.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a saved place.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type PlaceId = Uuid;

/// Geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Checks that both components are finite and within WGS84 bounds.
    pub fn validate(&self) -> Result<(), PlaceValidationError> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(PlaceValidationError::NonFiniteCoordinate);
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(PlaceValidationError::LatitudeOutOfRange(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(PlaceValidationError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }
}

/// Validation failures for place writes and persisted rows.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceValidationError {
    EmptyTitle,
    NonFiniteCoordinate,
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
}

impl Display for PlaceValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "place title cannot be empty"),
            Self::NonFiniteCoordinate => write!(f, "place coordinate must be finite"),
            Self::LatitudeOutOfRange(value) => {
                write!(f, "latitude {value} is outside [-90, 90]")
            }
            Self::LongitudeOutOfRange(value) => {
                write!(f, "longitude {value} is outside [-180, 180]")
            }
        }
    }
}

impl Error for PlaceValidationError {}

/// Canonical saved place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Stable ID, the only lookup key.
    pub id: PlaceId,
    /// Display name shown as the list row and annotation title.
    pub title: String,
    /// Free-text comment shown as the annotation subtitle.
    pub subtitle: String,
    /// Captured when the pin was dropped.
    #[serde(flatten)]
    pub coordinate: Coordinate,
}

impl Place {
    /// Creates a new place with a generated stable ID.
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        coordinate: Coordinate,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), title, subtitle, coordinate)
    }

    /// Creates a place with a caller-provided stable ID.
    ///
    /// Used by read paths where identity already exists in storage.
    pub fn with_id(
        id: PlaceId,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        coordinate: Coordinate,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            subtitle: subtitle.into(),
            coordinate,
        }
    }

    /// Validates title and coordinate invariants.
    ///
    /// # Errors
    /// - `EmptyTitle` when the title is blank.
    /// - Coordinate errors from [`Coordinate::validate`].
    pub fn validate(&self) -> Result<(), PlaceValidationError> {
        if self.title.trim().is_empty() {
            return Err(PlaceValidationError::EmptyTitle);
        }
        self.coordinate.validate()
    }
}

/// List-row projection: name, comment and id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceSummary {
    pub id: PlaceId,
    pub title: String,
    pub subtitle: String,
}
