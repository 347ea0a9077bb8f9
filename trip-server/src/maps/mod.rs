//! Maps web-service client.
//!
//! This module provides an HTTP client for the directions and geocoding
//! endpoints that back route assembly.
//!
//! Key characteristics of these endpoints:
//! - Failures are reported both as HTTP status codes and as a `status`
//!   field in an otherwise successful JSON body
//! - "No match" (`ZERO_RESULTS`) is a successful response, not an error
//! - Directions paths are returned as encoded polylines

mod client;
mod error;
mod types;

pub use client::{MapsClient, MapsConfig};
pub use error::MapsError;
pub use types::{
    DirectionsResponse, DirectionsRoute, EncodedPolyline, GeocodeResponse, GeocodeResult,
    Geometry, LatLng, RouteLeg, TextValue,
};
