//! Trip API error types.

use crate::domain::TripId;

/// Errors that can occur when fetching from the trip API.
#[derive(Debug, thiserror::Error)]
pub enum TripError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The trip does not exist
    #[error("trip {0} not found")]
    NotFound(TripId),

    /// Authentication failed
    #[error("unauthorized: check TRIPS_API_TOKEN")]
    Unauthorized,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The configured base URL cannot be used
    #[error("invalid trip API URL: {0}")]
    InvalidUrl(String),
}
