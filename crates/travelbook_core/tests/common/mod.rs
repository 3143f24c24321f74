#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use travelbook_core::{
    ChangeChannel, Coordinate, DetailRoute, DetailScreen, DirectionsHandoff, GeocodeError,
    Geocoder, LocationService, LongPress, Navigator, PermissionDenied, Place, PlaceId,
    PlaceRepository, PlaceService, PlaceSummary, Placemark, PlatformServices, RepoError,
    RepoResult, SqlitePlaceRepository, TravelMode,
};

#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    PushDetail(DetailRoute),
    Pop,
}

#[derive(Default)]
pub struct RecordingNavigator {
    events: Mutex<Vec<NavEvent>>,
}

impl RecordingNavigator {
    pub fn events(&self) -> Vec<NavEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn last_route(&self) -> Option<DetailRoute> {
        self.events().into_iter().rev().find_map(|event| match event {
            NavEvent::PushDetail(route) => Some(route),
            NavEvent::Pop => None,
        })
    }
}

impl Navigator for RecordingNavigator {
    fn push_detail(&self, route: DetailRoute) {
        self.events.lock().unwrap().push(NavEvent::PushDetail(route));
    }

    fn pop(&self) {
        self.events.lock().unwrap().push(NavEvent::Pop);
    }
}

#[derive(Default)]
pub struct FakeLocation {
    pub deny: bool,
    pub permission_requests: AtomicUsize,
    pub started: AtomicUsize,
    pub stopped: AtomicUsize,
}

impl FakeLocation {
    pub fn denying() -> Self {
        Self {
            deny: true,
            ..Self::default()
        }
    }
}

impl LocationService for FakeLocation {
    fn request_permission(&self) -> Result<(), PermissionDenied> {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
        if self.deny {
            Err(PermissionDenied)
        } else {
            Ok(())
        }
    }

    fn start_updates(&self) {
        self.started.fetch_add(1, Ordering::SeqCst);
    }

    fn stop_updates(&self) {
        self.stopped.fetch_add(1, Ordering::SeqCst);
    }
}

/// Geocoder that parks callbacks until the test resolves them.
#[derive(Default)]
pub struct DeferredGeocoder {
    pending: Mutex<Vec<(Coordinate, travelbook_core::platform::GeocodeCallback)>>,
}

impl DeferredGeocoder {
    pub fn pending_count(&self) -> usize {
        self.pending.lock().unwrap().len()
    }

    pub fn pending_coordinates(&self) -> Vec<Coordinate> {
        self.pending
            .lock()
            .unwrap()
            .iter()
            .map(|(coordinate, _)| *coordinate)
            .collect()
    }

    pub fn resolve_all_ok(&self) {
        let pending = std::mem::take(&mut *self.pending.lock().unwrap());
        for (coordinate, done) in pending {
            done(Ok(Placemark {
                coordinate,
                address: Some("1 Test Street".to_string()),
            }));
        }
    }

    pub fn fail_all(&self) {
        let pending = std::mem::take(&mut *self.pending.lock().unwrap());
        for (_, done) in pending {
            done(Err(GeocodeError::Failed("offline".to_string())));
        }
    }
}

impl Geocoder for DeferredGeocoder {
    fn reverse_geocode(
        &self,
        coordinate: Coordinate,
        done: travelbook_core::platform::GeocodeCallback,
    ) {
        self.pending.lock().unwrap().push((coordinate, done));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Handoff {
    pub destination: Placemark,
    pub label: String,
    pub mode: TravelMode,
}

#[derive(Default)]
pub struct RecordingDirections {
    handoffs: Mutex<Vec<Handoff>>,
}

impl RecordingDirections {
    pub fn handoffs(&self) -> Vec<Handoff> {
        self.handoffs.lock().unwrap().clone()
    }
}

impl DirectionsHandoff for RecordingDirections {
    fn open_directions(&self, destination: &Placemark, label: &str, mode: TravelMode) {
        self.handoffs.lock().unwrap().push(Handoff {
            destination: destination.clone(),
            label: label.to_string(),
            mode,
        });
    }
}

/// Failure switches shared between a test and its `FlakyRepository`.
#[derive(Default)]
pub struct FailureSwitches {
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
}

impl FailureSwitches {
    pub fn set_fail_reads(&self, value: bool) {
        self.fail_reads.store(value, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, value: bool) {
        self.fail_writes.store(value, Ordering::SeqCst);
    }
}

/// Repository wrapper whose reads and writes can be switched to fail.
pub struct FlakyRepository {
    inner: SqlitePlaceRepository,
    switches: Arc<FailureSwitches>,
}

impl FlakyRepository {
    pub fn new() -> Self {
        Self {
            inner: SqlitePlaceRepository::open_in_memory().unwrap(),
            switches: Arc::new(FailureSwitches::default()),
        }
    }

    pub fn switches(&self) -> Arc<FailureSwitches> {
        Arc::clone(&self.switches)
    }

    fn injected() -> RepoError {
        RepoError::InvalidData("injected failure".to_string())
    }
}

impl PlaceRepository for FlakyRepository {
    fn create_place(&self, place: &Place) -> RepoResult<PlaceId> {
        if self.switches.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::injected());
        }
        self.inner.create_place(place)
    }

    fn list_places(&self) -> RepoResult<Vec<PlaceSummary>> {
        if self.switches.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::injected());
        }
        self.inner.list_places()
    }

    fn get_place(&self, id: PlaceId) -> RepoResult<Option<Place>> {
        if self.switches.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::injected());
        }
        self.inner.get_place(id)
    }
}

/// Wiring shared by screen tests.
pub struct Harness<R: PlaceRepository> {
    pub service: Arc<PlaceService<R>>,
    pub channel: ChangeChannel,
    pub navigator: Arc<RecordingNavigator>,
    pub location: Arc<FakeLocation>,
    pub geocoder: Arc<DeferredGeocoder>,
    pub directions: Arc<RecordingDirections>,
}

impl Harness<SqlitePlaceRepository> {
    pub fn in_memory() -> Self {
        Self::with_repo(SqlitePlaceRepository::open_in_memory().unwrap())
    }
}

impl<R: PlaceRepository> Harness<R> {
    pub fn with_repo(repo: R) -> Self {
        Self::with_location(repo, FakeLocation::default())
    }

    pub fn with_location(repo: R, location: FakeLocation) -> Self {
        Self {
            service: Arc::new(PlaceService::new(repo)),
            channel: ChangeChannel::new(),
            navigator: Arc::new(RecordingNavigator::default()),
            location: Arc::new(location),
            geocoder: Arc::new(DeferredGeocoder::default()),
            directions: Arc::new(RecordingDirections::default()),
        }
    }

    pub fn platform(&self) -> PlatformServices {
        PlatformServices {
            location: self.location.clone(),
            geocoder: self.geocoder.clone(),
            directions: self.directions.clone(),
        }
    }

    pub fn open_detail(&self, route: DetailRoute) -> DetailScreen<R> {
        DetailScreen::open(
            route,
            Arc::clone(&self.service),
            self.channel.clone(),
            self.navigator.clone(),
            self.platform(),
        )
    }
}

pub fn long_press_at(latitude: f64, longitude: f64) -> LongPress {
    LongPress {
        coordinate: Coordinate::new(latitude, longitude),
        held_for: Duration::from_secs(3),
    }
}
