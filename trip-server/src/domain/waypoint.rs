//! Free-text place descriptors supplied by users.

/// A location the user typed, before geocoding.
///
/// Waypoints are always handled as ordered lists; their position in the
/// list is significant and survives concurrent resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Waypoint {
    pub id: String,
    pub text: String,
}

impl Waypoint {
    /// Creates a waypoint.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// Returns true if the descriptor has no usable text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
