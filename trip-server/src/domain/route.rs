//! Renderable route view model.

use std::fmt;

use super::{GeocodedPoint, PathPoint};

/// Why a waypoint is missing from a route's markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GapReason {
    /// The geocoder had no match for the text.
    NotFound,
    /// The lookup itself failed.
    Failed(String),
}

impl fmt::Display for GapReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GapReason::NotFound => f.write_str("not found"),
            GapReason::Failed(message) => write!(f, "lookup failed: {message}"),
        }
    }
}

/// A waypoint that could not be resolved to a marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionGap {
    pub source_index: usize,
    pub waypoint_id: String,
    pub reason: GapReason,
}

/// A route ready to draw: decoded path, waypoint markers and a distance label.
///
/// # Invariants
///
/// - `path` is in encoded order, one point per encoded coordinate pair
/// - `markers` are strictly ascending by `source_index`
/// - every `source_index` appears in exactly one of `markers` or `unresolved`
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub path: Vec<PathPoint>,
    pub markers: Vec<GeocodedPoint>,
    pub distance_label: String,
    pub unresolved: Vec<ResolutionGap>,
}

impl Route {
    /// Returns true if every requested location produced a marker.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}
