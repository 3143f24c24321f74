//! Host platform collaborator contracts.
//!
//! # Responsibility
//! - Describe what the core needs from location services, geocoding, the
//!   external maps app and the host navigation stack.
//! - Keep platform SDK types out of core; hosts adapt their SDKs to these traits.
//!
//! # Invariants
//! - Every trait object is `Send + Sync` so screens can hold them in `Arc`.
//! - Geocoding completes through a callback that may fire after the calling
//!   screen is gone.

use crate::model::place::Coordinate;
use crate::ui::route::DetailRoute;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Location access was refused by the user or the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionDenied;

impl Display for PermissionDenied {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "location permission denied")
    }
}

impl Error for PermissionDenied {}

/// Reverse-geocoding failure reported by the host geocoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocodeError {
    /// The lookup succeeded but returned no placemark.
    NoResult,
    /// The geocoder reported a failure (network, throttling, ...).
    Failed(String),
}

impl Display for GeocodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoResult => write!(f, "reverse geocoding returned no placemark"),
            Self::Failed(message) => write!(f, "reverse geocoding failed: {message}"),
        }
    }
}

impl Error for GeocodeError {}

/// Resolved address for a coordinate, as returned by reverse geocoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Placemark {
    pub coordinate: Coordinate,
    /// Human-readable address line when the geocoder provides one.
    pub address: Option<String>,
}

/// Routing mode requested from the external maps application.
///
/// Saved places are always handed off for driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelMode {
    Driving,
}

pub type GeocodeCallback = Box<dyn FnOnce(Result<Placemark, GeocodeError>) + Send + 'static>;

/// Device location source.
///
/// Readings are delivered back through `DetailScreen::on_location_update`.
pub trait LocationService: Send + Sync {
    fn request_permission(&self) -> Result<(), PermissionDenied>;
    fn start_updates(&self);
    fn stop_updates(&self);
}

/// Asynchronous reverse geocoder.
pub trait Geocoder: Send + Sync {
    fn reverse_geocode(&self, coordinate: Coordinate, done: GeocodeCallback);
}

/// Hand-off to an external maps application.
pub trait DirectionsHandoff: Send + Sync {
    fn open_directions(&self, destination: &Placemark, label: &str, mode: TravelMode);
}

/// Host navigation stack.
pub trait Navigator: Send + Sync {
    /// Pushes the detail screen for `route`.
    fn push_detail(&self, route: DetailRoute);
    /// Pops the top screen.
    fn pop(&self);
}

/// Bundle of platform services the detail screen talks to.
#[derive(Clone)]
pub struct PlatformServices {
    pub location: Arc<dyn LocationService>,
    pub geocoder: Arc<dyn Geocoder>,
    pub directions: Arc<dyn DirectionsHandoff>,
}
