//! Ordered itinerary of a trip.

use super::{MAX_SEQUENCE, Stint, StintId, TripId};

/// A trip's stints in display order.
///
/// # Invariants
///
/// - Stints are strictly ascending by `sequence` (sequence numbers are unique)
/// - Each stint's timeline is strictly ascending by entry sequence
/// - No sequence number exceeds [`MAX_SEQUENCE`], so the `next_*` queries
///   cannot overflow
///
/// Callers can render an itinerary directly without reordering anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itinerary {
    trip_id: TripId,
    stints: Vec<Stint>,
}

impl Itinerary {
    /// Builds an itinerary from stints already in ascending sequence order.
    pub(crate) fn from_ordered(trip_id: TripId, stints: Vec<Stint>) -> Self {
        debug_assert!(stints.windows(2).all(|w| w[0].sequence < w[1].sequence));
        debug_assert!(stints.iter().all(|s| s.sequence <= MAX_SEQUENCE));
        Self { trip_id, stints }
    }

    pub fn trip_id(&self) -> &TripId {
        &self.trip_id
    }

    /// Stints in ascending sequence order.
    pub fn stints(&self) -> &[Stint] {
        &self.stints
    }

    pub fn is_empty(&self) -> bool {
        self.stints.is_empty()
    }

    /// Sequence number for a newly appended stint: one past the current
    /// maximum, or 1 for a trip with no stints.
    pub fn next_stint_sequence(&self) -> u32 {
        self.latest_stint().map_or(1, |s| s.sequence + 1)
    }

    /// The stint with the highest sequence number.
    ///
    /// Used as the default target when a new stop is added without an
    /// explicitly selected stint.
    pub fn latest_stint(&self) -> Option<&Stint> {
        self.stints.last()
    }

    /// Looks up a stint by id.
    pub fn stint(&self, id: &StintId) -> Option<&Stint> {
        self.stints.iter().find(|s| &s.id == id)
    }
}
