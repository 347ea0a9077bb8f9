//! Remote trip API client.
//!
//! Fetches a trip's stints and their timeline records. The API stores
//! timeline records loosely typed; `convert_entry` turns them into typed
//! domain entries.

mod client;
mod convert;
mod error;
mod types;

pub use client::{TripClient, TripClientConfig};
pub use convert::{ConversionError, convert_entry, parse_time};
pub use error::TripError;
pub use types::{RawStint, RawTimelineItem, TimelineResponse};
