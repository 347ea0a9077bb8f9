//! Timeline source for the itinerary pipeline.

use std::future::Future;

use crate::domain::TripId;
use crate::trips::{TimelineResponse, TripError};

/// Fetches a trip's raw stint and timeline records.
///
/// This abstraction allows the assembler to be tested without a trip API.
pub trait TimelineProvider {
    fn fetch_timeline(
        &self,
        trip_id: &TripId,
    ) -> impl Future<Output = Result<TimelineResponse, TripError>> + Send;
}
