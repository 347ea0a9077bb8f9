//! Route construction pipeline.
//!
//! This module turns what a user typed (an origin, a destination and
//! intermediate stops) into something a map can draw:
//!
//! - [`decode_polyline`] expands a compact encoded path into points
//! - [`WaypointResolver`] geocodes locations concurrently while keeping
//!   their input order
//! - [`RouteAssembler`] drives one directions lookup plus both of the above
//!
//! External lookups are reached only through the [`Geocoder`] and
//! [`DirectionsProvider`] traits.

mod assembler;
mod cancel;
mod polyline;
mod provider;
mod resolver;

pub use assembler::{RouteAssembler, RouteError, RouteRequest};
pub use cancel::{CancelHandle, CancelToken, Cancelled, cancel_pair};
pub use polyline::{PolylineError, decode as decode_polyline};
pub use provider::{DirectionsProvider, DirectionsQuery, Geocoder, Place};
pub use resolver::{Resolution, WaypointResolver};
