//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose place create / list / get to Dart via FRB.
//! - Convert core errors into `ok=false` envelopes with a readable message.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - The store path is resolved once per process.
//! - A successful create publishes `PlaceAdded` on the process-wide channel.

use log::{error, info};
use std::path::PathBuf;
use std::sync::OnceLock;
use travelbook_core::config::resolve_db_path;
use travelbook_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ChangeChannel, Coordinate, Place, PlaceId, PlaceService, PlaceSummary, RepoError,
    SqlitePlaceRepository, Topic,
};
use uuid::Uuid;

static PLACE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// List row projection of a saved place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceListItem {
    /// Stable place ID in string form.
    pub place_id: String,
    pub title: String,
    pub subtitle: String,
}

/// Full saved place, including its pin coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDetailItem {
    pub place_id: String,
    pub title: String,
    pub subtitle: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Action response envelope for place creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Created place ID on success.
    pub place_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl PlaceActionResponse {
    fn success(place_id: PlaceId) -> Self {
        Self {
            ok: true,
            place_id: Some(place_id.to_string()),
            message: "Place saved.".to_string(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            place_id: None,
            message: message.into(),
        }
    }
}

/// Response envelope for the saved-places list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceListResponse {
    pub ok: bool,
    /// Rows in insertion order; empty on failure.
    pub items: Vec<PlaceListItem>,
    pub message: String,
}

/// Response envelope for a single place lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDetailResponse {
    /// `true` when the lookup ran, even if nothing matched.
    pub ok: bool,
    /// `None` when the ID is unknown or the lookup failed.
    pub item: Option<PlaceDetailItem>,
    pub message: String,
}

/// Saves a new place.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Blank titles and out-of-range coordinates return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn place_create(
    title: String,
    subtitle: String,
    latitude: f64,
    longitude: f64,
) -> PlaceActionResponse {
    let coordinate = Coordinate::new(latitude, longitude);
    match with_place_service(|service| service.create_place(title, subtitle, coordinate)) {
        Ok(place_id) => {
            let delivered = ChangeChannel::global().publish(Topic::PlaceAdded);
            info!("event=ffi_place_create module=ffi status=ok place_id={place_id} notified={delivered}");
            PlaceActionResponse::success(place_id)
        }
        Err(err) => {
            error!("event=ffi_place_create module=ffi status=error error={err}");
            PlaceActionResponse::failure(format!("place_create failed: {err}"))
        }
    }
}

/// Lists every saved place in insertion order.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn place_list() -> PlaceListResponse {
    match with_place_service(|service| service.fetch_all_places()) {
        Ok(places) => {
            let items = places.into_iter().map(to_list_item).collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No places yet.".to_string()
            } else {
                format!("Found {} place(s).", items.len())
            };
            PlaceListResponse {
                ok: true,
                items,
                message,
            }
        }
        Err(err) => PlaceListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("place_list failed: {err}"),
        },
    }
}

/// Loads one saved place by ID.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Malformed IDs return `ok=false`; unknown IDs return `ok=true, item=None`.
#[flutter_rust_bridge::frb(sync)]
pub fn place_get(place_id: String) -> PlaceDetailResponse {
    let id = match Uuid::parse_str(place_id.trim()) {
        Ok(id) => id,
        Err(_) => {
            return PlaceDetailResponse {
                ok: false,
                item: None,
                message: format!("place_get failed: invalid place id `{}`", place_id.trim()),
            };
        }
    };

    match with_place_service(|service| service.fetch_place(id)) {
        Ok(Some(place)) => PlaceDetailResponse {
            ok: true,
            item: Some(to_detail_item(place)),
            message: "Place found.".to_string(),
        },
        Ok(None) => PlaceDetailResponse {
            ok: true,
            item: None,
            message: "Place not found.".to_string(),
        },
        Err(err) => PlaceDetailResponse {
            ok: false,
            item: None,
            message: format!("place_get failed: {err}"),
        },
    }
}

fn resolve_place_db_path() -> PathBuf {
    PLACE_DB_PATH.get_or_init(resolve_db_path).clone()
}

fn with_place_service<T>(
    f: impl FnOnce(&PlaceService<SqlitePlaceRepository>) -> Result<T, RepoError>,
) -> Result<T, String> {
    let repo = SqlitePlaceRepository::open(resolve_place_db_path())
        .map_err(|err| format!("place store open failed: {err}"))?;
    let service = PlaceService::new(repo);
    f(&service).map_err(|err| err.to_string())
}

fn to_list_item(summary: PlaceSummary) -> PlaceListItem {
    PlaceListItem {
        place_id: summary.id.to_string(),
        title: summary.title,
        subtitle: summary.subtitle,
    }
}

fn to_detail_item(place: Place) -> PlaceDetailItem {
    PlaceDetailItem {
        place_id: place.id.to_string(),
        title: place.title,
        subtitle: place.subtitle,
        latitude: place.coordinate.latitude,
        longitude: place.coordinate.longitude,
    }
}
