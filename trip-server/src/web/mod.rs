//! Web layer for the trip planner.
//!
//! A thin JSON API over the route and itinerary pipelines.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
