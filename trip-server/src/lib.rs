//! Road trip planner server.
//!
//! Builds drawable routes from free-text locations and ordered itineraries
//! from a trip's stored stints, and serves both over a JSON API.

pub mod cache;
pub mod config;
pub mod domain;
pub mod itinerary;
pub mod maps;
pub mod route;
pub mod trips;
pub mod web;
