//! Navigation arguments passed from the list screen to the detail screen.

use crate::model::place::PlaceId;

/// Selection copied across the navigation boundary.
///
/// `chosen_id` present means "view this place"; absent means "create".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailRoute {
    pub chosen_title: String,
    pub chosen_id: Option<PlaceId>,
}

impl DetailRoute {
    /// Route for creating a new place.
    pub fn create() -> Self {
        Self::default()
    }

    /// Route for viewing a saved place.
    pub fn view(title: impl Into<String>, id: PlaceId) -> Self {
        Self {
            chosen_title: title.into(),
            chosen_id: Some(id),
        }
    }

    pub fn is_view(&self) -> bool {
        self.chosen_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::DetailRoute;
    use uuid::Uuid;

    #[test]
    fn mode_is_derived_from_identifier_presence() {
        assert!(!DetailRoute::create().is_view());
        assert!(DetailRoute::view("Home", Uuid::new_v4()).is_view());
    }
}
