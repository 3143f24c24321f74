//! Map detail screen: create a place or view a saved one.
//!
//! # Responsibility
//! - Decide create/view mode once from the incoming route.
//! - Capture long-pressed coordinates, pin a single draft, persist on save.
//! - Load a saved place, pin it, and hand off driving directions on request.
//!
//! # Invariants
//! - The mode never changes after `open`.
//! - View mode never edits fields, never re-centers on location updates and
//!   never saves.
//! - Save without a captured coordinate is rejected; no place is stored at a
//!   default coordinate.
//! - At most one draft annotation exists, always at the captured coordinate.
//! - Geocode callbacks that arrive after `close` do nothing.

use crate::event::{ChangeChannel, Topic};
use crate::map::{Annotation, AnnotationKind, LongPress, MapState};
use crate::model::place::{Coordinate, Place, PlaceId};
use crate::platform::{Navigator, PlatformServices, TravelMode};
use crate::repo::place_repo::{PlaceRepository, RepoError};
use crate::service::place_service::PlaceService;
use crate::ui::route::DetailRoute;
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Operating mode, fixed at navigation time.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailMode {
    /// Blank map; the user drops and saves a new place.
    Create,
    /// Read-only view of a saved place.
    View(ViewedPlace),
}

/// Place requested by a view route.
///
/// `place` is `None` when the lookup failed or matched nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewedPlace {
    pub id: PlaceId,
    pub place: Option<Place>,
}

/// Reasons a save request is rejected.
#[derive(Debug)]
pub enum SaveError {
    /// The screen is in view mode.
    NotEditable,
    /// No coordinate has been captured by a long-press yet.
    MissingDraftPin,
    Persistence(RepoError),
}

impl Display for SaveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotEditable => write!(f, "saved places cannot be edited"),
            Self::MissingDraftPin => write!(f, "long-press the map to choose a location before saving"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SaveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence(err) => Some(err),
            Self::NotEditable | Self::MissingDraftPin => None,
        }
    }
}

impl From<RepoError> for SaveError {
    fn from(value: RepoError) -> Self {
        Self::Persistence(value)
    }
}

/// Detail screen state.
pub struct DetailScreen<R: PlaceRepository> {
    service: Arc<PlaceService<R>>,
    channel: ChangeChannel,
    navigator: Arc<dyn Navigator>,
    platform: PlatformServices,
    mode: DetailMode,
    name: String,
    comment: String,
    captured: Option<Coordinate>,
    map: MapState,
    current: Arc<AtomicBool>,
}

impl<R: PlaceRepository> DetailScreen<R> {
    /// Builds the screen for `route` and starts location updates.
    ///
    /// A view route loads its place immediately; lookup failures are logged
    /// and leave the map empty.
    pub fn open(
        route: DetailRoute,
        service: Arc<PlaceService<R>>,
        channel: ChangeChannel,
        navigator: Arc<dyn Navigator>,
        platform: PlatformServices,
    ) -> Self {
        if let Err(err) = platform.location.request_permission() {
            warn!("event=location_permission module=ui status=denied error={err}");
        }
        platform.location.start_updates();

        let mut screen = Self {
            service,
            channel,
            navigator,
            platform,
            mode: DetailMode::Create,
            name: String::new(),
            comment: String::new(),
            captured: None,
            map: MapState::default(),
            current: Arc::new(AtomicBool::new(true)),
        };

        if let Some(id) = route.chosen_id {
            let place = screen.load_place(id);
            screen.mode = DetailMode::View(ViewedPlace { id, place });
        }
        info!(
            "event=detail_open module=ui status=ok mode={}",
            if screen.is_editable() { "create" } else { "view" }
        );
        screen
    }

    fn load_place(&mut self, id: PlaceId) -> Option<Place> {
        let place = match self.service.fetch_place(id) {
            Ok(Some(place)) => place,
            Ok(None) => {
                warn!("event=detail_load module=ui status=not_found place_id={id}");
                return None;
            }
            Err(err) => {
                error!("event=detail_load module=ui status=error place_id={id} error={err}");
                return None;
            }
        };

        self.map.add_annotation(Annotation::saved(&place));
        self.map.center_on(place.coordinate);
        self.name = place.title.clone();
        self.comment = place.subtitle.clone();
        self.platform.location.stop_updates();
        Some(place)
    }

    pub fn mode(&self) -> &DetailMode {
        &self.mode
    }

    /// Whether the name/comment fields accept input.
    pub fn is_editable(&self) -> bool {
        matches!(self.mode, DetailMode::Create)
    }

    pub fn is_save_visible(&self) -> bool {
        self.is_editable()
    }

    /// Whether save would currently be accepted.
    pub fn can_save(&self) -> bool {
        self.is_editable() && self.captured.is_some()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn map(&self) -> &MapState {
        &self.map
    }

    /// Coordinate of the last qualifying long-press, if any.
    pub fn captured_coordinate(&self) -> Option<Coordinate> {
        self.captured
    }

    /// Returns `false` and ignores the text in view mode.
    pub fn set_name(&mut self, text: impl Into<String>) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.name = text.into();
        true
    }

    /// Returns `false` and ignores the text in view mode.
    pub fn set_comment(&mut self, text: impl Into<String>) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.comment = text.into();
        true
    }

    /// Device location reading. Only create mode follows the user.
    pub fn on_location_update(&mut self, coordinate: Coordinate) {
        if !self.is_current() || !self.is_editable() {
            return;
        }
        self.map.center_on(coordinate);
    }

    /// Captures the pressed coordinate and drops or moves the draft pin.
    ///
    /// Any hold of at least `LONG_PRESS_MIN_DURATION` in create mode captures
    /// the coordinate. The annotation is only placed when name and comment
    /// are both non-empty; the return value reports whether it was.
    pub fn on_long_press(&mut self, press: LongPress) -> bool {
        if !press.is_long_enough() || !self.is_editable() {
            return false;
        }
        self.captured = Some(press.coordinate);
        if self.name.is_empty() || self.comment.is_empty() {
            self.map.clear_draft();
            debug!("event=draft_pin module=ui status=captured_only reason=empty_fields");
            return false;
        }

        self.map.set_draft(Annotation {
            title: self.name.clone(),
            subtitle: self.comment.clone(),
            coordinate: press.coordinate,
            kind: AnnotationKind::Draft,
        });
        debug!("event=draft_pin module=ui status=ok");
        true
    }

    /// Persists the draft pin, notifies listeners and pops back.
    ///
    /// # Errors
    /// - `NotEditable` in view mode.
    /// - `MissingDraftPin` before any long-press captured a coordinate.
    /// - `Persistence` when the store rejects the write; fields are kept.
    pub fn save(&mut self) -> Result<PlaceId, SaveError> {
        if !self.is_editable() {
            warn!("event=detail_save module=ui status=rejected reason=view_mode");
            return Err(SaveError::NotEditable);
        }
        let Some(coordinate) = self.captured else {
            warn!("event=detail_save module=ui status=rejected reason=no_captured_coordinate");
            return Err(SaveError::MissingDraftPin);
        };

        let place_id =
            match self
                .service
                .create_place(self.name.as_str(), self.comment.as_str(), coordinate)
            {
                Ok(place_id) => place_id,
                Err(err) => {
                    error!("event=detail_save module=ui status=error error={err}");
                    return Err(err.into());
                }
            };

        self.name.clear();
        self.comment.clear();
        self.captured = None;
        let delivered = self.channel.publish(Topic::PlaceAdded);
        info!("event=detail_save module=ui status=ok place_id={place_id} notified={delivered}");
        self.navigator.pop();
        Ok(place_id)
    }

    /// Annotation accessory tap: geocode the saved place, then open driving
    /// directions in the external maps app.
    ///
    /// Returns `false` when there is no loaded place to navigate to.
    pub fn tap_annotation_accessory(&self) -> bool {
        let DetailMode::View(ViewedPlace {
            place: Some(place), ..
        }) = &self.mode
        else {
            return false;
        };

        let current = Arc::clone(&self.current);
        let directions = Arc::clone(&self.platform.directions);
        let label = place.title.clone();
        let place_id = place.id;
        self.platform.geocoder.reverse_geocode(
            place.coordinate,
            Box::new(move |result| {
                if !current.load(Ordering::SeqCst) {
                    debug!("event=directions_handoff module=ui status=skipped reason=screen_closed place_id={place_id}");
                    return;
                }
                match result {
                    Ok(placemark) => {
                        directions.open_directions(&placemark, &label, TravelMode::Driving);
                        info!("event=directions_handoff module=ui status=ok place_id={place_id}");
                    }
                    Err(err) => {
                        debug!("event=directions_handoff module=ui status=skipped place_id={place_id} error={err}");
                    }
                }
            }),
        );
        true
    }

    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst)
    }

    /// Tears the screen down: stops location updates and invalidates pending
    /// geocode callbacks. Idempotent; also runs on drop.
    pub fn close(&mut self) {
        if self.current.swap(false, Ordering::SeqCst) {
            self.platform.location.stop_updates();
        }
    }
}

impl<R: PlaceRepository> Drop for DetailScreen<R> {
    fn drop(&mut self) {
        self.close();
    }
}
