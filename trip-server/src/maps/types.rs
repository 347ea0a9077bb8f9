//! Maps API response DTOs.
//!
//! These map onto the directions and geocoding JSON responses. Only the
//! fields the route pipeline reads are declared; everything else is
//! ignored during deserialization.

use serde::Deserialize;

/// Response from the directions endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectionsResponse {
    /// `OK`, `ZERO_RESULTS`, `NOT_FOUND`, or an error status.
    #[serde(default)]
    pub status: String,

    /// Candidate routes, best first. Empty when nothing connects the points.
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,

    /// Extra detail the API attaches to error statuses.
    pub error_message: Option<String>,
}

/// One candidate route.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsRoute {
    /// One leg per consecutive pair of origin, waypoints, destination.
    #[serde(default)]
    pub legs: Vec<RouteLeg>,

    /// Encoded path approximating the whole route.
    pub overview_polyline: EncodedPolyline,

    pub summary: Option<String>,
}

/// A leg between two consecutive requested locations.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteLeg {
    pub distance: Option<TextValue>,
    pub duration: Option<TextValue>,
    pub start_address: Option<String>,
    pub end_address: Option<String>,
}

/// Human-readable text with its numeric value (metres or seconds).
#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    pub text: String,
    #[serde(default)]
    pub value: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EncodedPolyline {
    pub points: String,
}

/// Response from the geocoding endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub results: Vec<GeocodeResult>,

    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: Option<String>,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}
