//! Stint and trip identifiers and the stint record.

use std::fmt;

use super::TimelineEntry;

/// Highest sequence number a stint or timeline entry may carry.
///
/// One below `u32::MAX`, so there is always a next sequence number to
/// append with.
pub const MAX_SEQUENCE: u32 = u32::MAX - 1;

/// Identifier of a trip in the remote trip API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TripId(String);

impl TripId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a stint within a trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StintId(String);

impl StintId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A contiguous group of legs between two major waypoints of a trip.
///
/// The timeline is kept in ascending `sequence` order; only the itinerary
/// assembler builds stints, after ordering and validating the entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stint {
    pub id: StintId,
    pub sequence: u32,
    pub name: String,
    pub distance: Option<String>,
    pub estimated_duration: Option<String>,
    pub notes: Option<String>,
    timeline: Vec<TimelineEntry>,
}

impl Stint {
    /// Builds a stint from an already-ordered timeline.
    pub(crate) fn from_ordered(
        id: StintId,
        sequence: u32,
        name: String,
        distance: Option<String>,
        estimated_duration: Option<String>,
        notes: Option<String>,
        timeline: Vec<TimelineEntry>,
    ) -> Self {
        debug_assert!(
            timeline
                .windows(2)
                .all(|w| w[0].sequence() < w[1].sequence())
        );
        debug_assert!(sequence <= MAX_SEQUENCE);
        debug_assert!(timeline.iter().all(|e| e.sequence() <= MAX_SEQUENCE));
        Self {
            id,
            sequence,
            name,
            distance,
            estimated_duration,
            notes,
            timeline,
        }
    }

    /// Timeline entries in ascending sequence order.
    pub fn timeline(&self) -> &[TimelineEntry] {
        &self.timeline
    }

    /// Number of stops in the timeline.
    pub fn stop_count(&self) -> usize {
        self.timeline.iter().filter(|e| e.as_stop().is_some()).count()
    }

    /// Sequence number to use for an entry appended to this stint.
    pub fn next_entry_sequence(&self) -> u32 {
        self.timeline.last().map_or(1, |e| e.sequence() + 1)
    }
}
