//! Saved-places list screen.
//!
//! # Responsibility
//! - Keep a row cache of every saved place and reload it on demand.
//! - Turn "add" and row taps into detail-screen routes.
//!
//! # Invariants
//! - A reload replaces the whole row cache; a failed reload keeps the old one.
//! - At most one `PlaceAdded` subscription is live per screen instance.

use crate::event::{ChangeChannel, Subscription, Topic};
use crate::model::place::PlaceSummary;
use crate::platform::Navigator;
use crate::repo::place_repo::PlaceRepository;
use crate::service::place_service::PlaceService;
use crate::ui::route::DetailRoute;
use log::{error, info, warn};
use std::sync::{Arc, Mutex, PoisonError};

struct RowCache<R: PlaceRepository> {
    service: Arc<PlaceService<R>>,
    rows: Mutex<Vec<PlaceSummary>>,
}

impl<R: PlaceRepository> RowCache<R> {
    fn reload(&self) {
        match self.service.fetch_all_places() {
            Ok(places) => {
                let count = places.len();
                *self.rows.lock().unwrap_or_else(PoisonError::into_inner) = places;
                info!("event=list_reload module=ui status=ok rows={count}");
            }
            Err(err) => {
                error!("event=list_reload module=ui status=error keep_stale_rows=true error={err}");
            }
        }
    }

    fn snapshot(&self) -> Vec<PlaceSummary> {
        self.rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// List screen state.
pub struct ListScreen<R: PlaceRepository> {
    cache: Arc<RowCache<R>>,
    channel: ChangeChannel,
    navigator: Arc<dyn Navigator>,
    selection: DetailRoute,
    subscription: Option<Subscription>,
}

impl<R> ListScreen<R>
where
    R: PlaceRepository + Send + Sync + 'static,
{
    pub fn new(
        service: Arc<PlaceService<R>>,
        channel: ChangeChannel,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            cache: Arc::new(RowCache {
                service,
                rows: Mutex::new(Vec::new()),
            }),
            channel,
            navigator,
            selection: DetailRoute::create(),
            subscription: None,
        }
    }

    /// First-load hook: fills the row cache.
    pub fn load(&mut self) {
        self.cache.reload();
    }

    /// Appearance hook: subscribes to `PlaceAdded` once for this instance.
    pub fn appear(&mut self) {
        if self.subscription.is_some() {
            return;
        }
        let cache = Arc::clone(&self.cache);
        self.subscription = Some(
            self.channel
                .subscribe(Topic::PlaceAdded, move || cache.reload()),
        );
    }

    /// Releases the change subscription. Also happens on drop.
    pub fn dispose(&mut self) {
        self.subscription = None;
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Re-fetches every place, replacing the row cache.
    pub fn reload(&self) {
        self.cache.reload();
    }

    pub fn rows(&self) -> Vec<PlaceSummary> {
        self.cache.snapshot()
    }

    /// Row labels as rendered: one title per place.
    pub fn row_titles(&self) -> Vec<String> {
        self.cache
            .snapshot()
            .into_iter()
            .map(|row| row.title)
            .collect()
    }

    /// Selection most recently routed to the detail screen.
    pub fn selection(&self) -> &DetailRoute {
        &self.selection
    }

    /// "Add" control: clears the selection and opens create mode.
    pub fn tap_add(&mut self) {
        self.selection = DetailRoute::create();
        self.navigator.push_detail(self.selection.clone());
    }

    /// Row tap: selects that place and opens view mode.
    ///
    /// Returns `false` when `index` is outside the current rows.
    pub fn select_row(&mut self, index: usize) -> bool {
        let Some(row) = self.cache.snapshot().into_iter().nth(index) else {
            warn!("event=list_select module=ui status=ignored reason=index_out_of_range index={index}");
            return false;
        };
        self.selection = DetailRoute::view(row.title, row.id);
        self.navigator.push_detail(self.selection.clone());
        true
    }
}
