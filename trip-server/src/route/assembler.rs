//! Route assembly.
//!
//! Turns an origin, destination and ordered waypoints into a renderable
//! [`Route`]: one directions lookup, then the overview path is decoded and
//! every location is geocoded into a marker.

use tracing::debug;

use crate::domain::{Route, Waypoint};
use crate::maps::MapsError;

use super::cancel::{CancelToken, Cancelled};
use super::polyline::{self, PolylineError};
use super::provider::{DirectionsProvider, DirectionsQuery, Geocoder};
use super::resolver::WaypointResolver;

/// Error from route assembly.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// The directions lookup returned no candidate routes.
    #[error("no route found between the requested locations")]
    NoRouteFound,

    /// The route's overview path could not be decoded.
    #[error("route path could not be decoded: {0}")]
    MalformedPath(#[from] PolylineError),

    /// The directions lookup itself failed.
    #[error("directions lookup failed: {0}")]
    Lookup(#[from] MapsError),

    /// The request cannot be sent as-is.
    #[error("invalid route request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}

/// Request for a route.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub origin: Waypoint,
    pub destination: Waypoint,
    /// Intermediate stops, in travel order.
    pub waypoints: Vec<Waypoint>,
}

impl RouteRequest {
    /// Create a new route request.
    pub fn new(origin: Waypoint, destination: Waypoint, waypoints: Vec<Waypoint>) -> Self {
        Self {
            origin,
            destination,
            waypoints,
        }
    }

    /// Validate the route request.
    pub fn validate(&self) -> Result<(), RouteError> {
        if self.origin.is_blank() {
            return Err(RouteError::InvalidRequest("origin is empty".to_string()));
        }
        if self.destination.is_blank() {
            return Err(RouteError::InvalidRequest(
                "destination is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// All locations in travel order: origin, waypoints, destination.
    ///
    /// Marker `source_index` values index into this list.
    pub fn locations(&self) -> Vec<Waypoint> {
        let mut locations = Vec::with_capacity(self.waypoints.len() + 2);
        locations.push(self.origin.clone());
        locations.extend(self.waypoints.iter().cloned());
        locations.push(self.destination.clone());
        locations
    }

    /// The directions query for this request.
    pub fn query(&self) -> DirectionsQuery {
        DirectionsQuery {
            origin: self.origin.text.clone(),
            destination: self.destination.text.clone(),
            waypoints: self.waypoints.iter().map(|w| w.text.clone()).collect(),
        }
    }
}

/// Builds routes from a directions provider and a geocoder.
pub struct RouteAssembler<'a, D: DirectionsProvider, G: Geocoder> {
    directions: &'a D,
    resolver: WaypointResolver<'a, G>,
}

impl<'a, D, G> RouteAssembler<'a, D, G>
where
    D: DirectionsProvider + Sync,
    G: Geocoder + Sync,
{
    /// Create a new assembler.
    pub fn new(directions: &'a D, geocoder: &'a G) -> Self {
        Self {
            directions,
            resolver: WaypointResolver::new(geocoder),
        }
    }

    /// Assemble a route.
    ///
    /// Fails with [`RouteError::NoRouteFound`] when the directions lookup
    /// finds nothing, without geocoding anything. Waypoints that fail to
    /// geocode are left out of the markers and reported in
    /// `Route::unresolved`.
    pub async fn assemble(&self, request: &RouteRequest) -> Result<Route, RouteError> {
        request.validate()?;

        let response = self.directions.directions(&request.query()).await?;

        let Some(candidate) = response.routes.into_iter().next() else {
            debug!(
                origin = %request.origin.text,
                destination = %request.destination.text,
                "no route found"
            );
            return Err(RouteError::NoRouteFound);
        };

        // A malformed path fails the request before any geocoding starts.
        let path = polyline::decode(&candidate.overview_polyline.points)?;

        let distance_label = candidate
            .legs
            .first()
            .and_then(|leg| leg.distance.as_ref())
            .map(|distance| distance.text.clone())
            .unwrap_or_default();

        let resolution = self.resolver.resolve(&request.locations()).await;

        debug!(
            points = path.len(),
            markers = resolution.markers.len(),
            unresolved = resolution.gaps.len(),
            distance = %distance_label,
            "route assembled"
        );

        Ok(Route {
            path,
            markers: resolution.markers,
            distance_label,
            unresolved: resolution.gaps,
        })
    }

    /// Like [`assemble`](Self::assemble), but abandons the request as soon
    /// as `cancel` fires. Lookups still in flight are dropped.
    pub async fn assemble_until(
        &self,
        request: &RouteRequest,
        cancel: &CancelToken,
    ) -> Result<Route, RouteError> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(Cancelled.into()),
            route = self.assemble(request) => route,
        }
    }
}

#[cfg(test)]
#[path = "assembler_tests.rs"]
mod tests;
