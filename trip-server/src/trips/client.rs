//! Trip API client.

use reqwest::Url;
use tracing::debug;

use crate::domain::TripId;
use crate::itinerary::TimelineProvider;

use super::error::TripError;
use super::types::TimelineResponse;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration for the trip API client.
#[derive(Debug, Clone)]
pub struct TripClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Bearer token sent with every request, if any
    pub api_token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TripClientConfig {
    /// Create a new config for the API at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Authenticate requests with a bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the remote trip API.
#[derive(Debug, Clone)]
pub struct TripClient {
    http: reqwest::Client,
    base_url: Url,
    api_token: Option<String>,
}

impl TripClient {
    /// Create a new trip API client.
    pub fn new(config: TripClientConfig) -> Result<Self, TripError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|e| TripError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(TripError::InvalidUrl(config.base_url));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            api_token: config.api_token,
        })
    }

    /// URL of a trip's timeline. The trip id is escaped as a path segment.
    fn timeline_url(&self, trip_id: &TripId) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in `new`
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["trips", trip_id.as_str(), "timeline"]);
        }
        url
    }

    /// Fetch a trip's stints and timeline records.
    pub async fn get_timeline(&self, trip_id: &TripId) -> Result<TimelineResponse, TripError> {
        let url = self.timeline_url(trip_id);

        let mut request = self.http.get(url);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(TripError::NotFound(trip_id.clone()));
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(TripError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TripError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let timeline: TimelineResponse =
            serde_json::from_str(&body).map_err(|e| TripError::Json {
                message: e.to_string(),
            })?;

        debug!(trip = %trip_id, stints = timeline.stints.len(), "fetched trip timeline");
        Ok(timeline)
    }
}

impl TimelineProvider for TripClient {
    async fn fetch_timeline(&self, trip_id: &TripId) -> Result<TimelineResponse, TripError> {
        self.get_timeline(trip_id).await
    }
}
