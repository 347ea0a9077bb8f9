//! Domain types for the trip planner.
//!
//! These are the read-only view models produced by the route and
//! itinerary pipelines. They are recomputed on every request and never
//! persisted.

mod geo;
mod itinerary;
mod route;
mod stint;
mod timeline;
mod waypoint;

pub use geo::{GeocodedPoint, PathPoint};
pub use itinerary::Itinerary;
pub use route::{GapReason, ResolutionGap, Route};
pub use stint::{MAX_SEQUENCE, Stint, StintId, TripId};
pub use timeline::{Departure, Leg, Stop, TimelineEntry};
pub use waypoint::Waypoint;
