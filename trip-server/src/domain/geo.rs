//! Geographic point types.

use std::fmt;

/// A decoded point on a route path.
///
/// Coordinates carry 5 decimal digits of precision, matching the
/// encoded-path format they are decoded from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl PathPoint {
    /// Creates a point from degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Creates a point from values scaled by 1e5, as stored in an encoded path.
    pub(crate) fn from_e5(lat_e5: i64, lng_e5: i64) -> Self {
        Self {
            latitude: lat_e5 as f64 / 1e5,
            longitude: lng_e5 as f64 / 1e5,
        }
    }
}

impl fmt::Display for PathPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

/// A waypoint that was successfully resolved to coordinates.
///
/// `source_index` is the position of the originating waypoint in the
/// request, so markers can be matched back to what the user typed even
/// though lookups complete in arbitrary order.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPoint {
    pub source_index: usize,
    pub waypoint_id: String,
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl GeocodedPoint {
    /// The marker position as a path point.
    pub fn position(&self) -> PathPoint {
        PathPoint::new(self.latitude, self.longitude)
    }
}
