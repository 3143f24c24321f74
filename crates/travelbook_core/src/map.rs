//! Renderer-agnostic map state owned by the detail screen.
//!
//! The host map widget draws `region` and `annotations`; the core never
//! touches tiles or gestures directly.

use crate::model::place::{Coordinate, Place};
use std::time::Duration;

/// Minimum hold before a long-press on the map counts as "drop a pin".
pub const LONG_PRESS_MIN_DURATION: Duration = Duration::from_secs(3);

/// Latitude/longitude delta used whenever the map re-centers.
pub const DEFAULT_SPAN_DELTA: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Default for Span {
    fn default() -> Self {
        Self {
            latitude_delta: DEFAULT_SPAN_DELTA,
            longitude_delta: DEFAULT_SPAN_DELTA,
        }
    }
}

/// Visible map region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub center: Coordinate,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    /// Not yet persisted; at most one exists.
    Draft,
    /// Loaded from the store.
    Saved,
}

/// Point annotation with callout text.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub title: String,
    pub subtitle: String,
    pub coordinate: Coordinate,
    pub kind: AnnotationKind,
}

impl Annotation {
    pub fn saved(place: &Place) -> Self {
        Self {
            title: place.title.clone(),
            subtitle: place.subtitle.clone(),
            coordinate: place.coordinate,
            kind: AnnotationKind::Saved,
        }
    }
}

/// A long-press reported by the host gesture recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LongPress {
    /// Touched point, already converted to map coordinates.
    pub coordinate: Coordinate,
    pub held_for: Duration,
}

impl LongPress {
    pub fn is_long_enough(&self) -> bool {
        self.held_for >= LONG_PRESS_MIN_DURATION
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapState {
    region: Option<Region>,
    annotations: Vec<Annotation>,
}

impl MapState {
    pub fn region(&self) -> Option<Region> {
        self.region
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Centers on `center` with the default span.
    pub fn center_on(&mut self, center: Coordinate) {
        self.region = Some(Region {
            center,
            span: Span::default(),
        });
    }

    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    /// Replaces the draft annotation, keeping saved ones.
    pub fn set_draft(&mut self, draft: Annotation) {
        self.clear_draft();
        self.annotations.push(Annotation {
            kind: AnnotationKind::Draft,
            ..draft
        });
    }

    /// Removes the draft annotation, if any.
    pub fn clear_draft(&mut self) {
        self.annotations
            .retain(|annotation| annotation.kind != AnnotationKind::Draft);
    }

    pub fn draft(&self) -> Option<&Annotation> {
        self.annotations
            .iter()
            .find(|annotation| annotation.kind == AnnotationKind::Draft)
    }
}
