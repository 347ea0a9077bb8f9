//! Itinerary construction.
//!
//! Trip records arrive from the trip API in no particular order: stints in
//! whatever order they were stored, each with its own unordered timeline.
//! [`assemble_itinerary`] turns them into an [`Itinerary`](crate::domain::Itinerary)
//! that can be rendered as-is, and [`ItineraryAssembler`] fetches and
//! assembles in one step.

mod assembler;
mod provider;

pub use assembler::{ItineraryAssembler, ItineraryError, assemble_itinerary};
pub use provider::TimelineProvider;
