//! Lookup capabilities the route pipeline depends on.
//!
//! The pipeline never talks to the network directly; it is handed
//! implementations of these traits. Production uses the maps client
//! (optionally behind the geocode cache), tests use in-memory mocks.

use std::future::Future;

use crate::maps::{DirectionsResponse, MapsError};

/// A resolved place.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    /// The geocoder's display name for the match, if it gave one.
    pub label: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Query for a directions lookup. Waypoint order is preserved in the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionsQuery {
    pub origin: String,
    pub destination: String,
    pub waypoints: Vec<String>,
}

/// Resolves free text to a place.
pub trait Geocoder {
    /// Looks up `address`. `Ok(None)` means the geocoder had no match.
    fn geocode(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Option<Place>, MapsError>> + Send;
}

/// Finds driving routes between an origin and a destination.
pub trait DirectionsProvider {
    /// Looks up candidate routes for `query`.
    ///
    /// A response with no routes is a successful lookup; deciding whether
    /// that is an error is up to the caller.
    fn directions(
        &self,
        query: &DirectionsQuery,
    ) -> impl Future<Output = Result<DirectionsResponse, MapsError>> + Send;
}
