//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{error, warn};

use crate::domain::TripId;
use crate::itinerary::{ItineraryAssembler, ItineraryError};
use crate::route::{RouteAssembler, RouteError};
use crate::trips::TripError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/route", post(plan_route))
        .route("/trips/:trip_id/itinerary", get(trip_itinerary))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Build a route through the requested locations.
async fn plan_route(
    State(state): State<AppState>,
    body: Result<Json<RouteRequestBody>, JsonRejection>,
) -> Result<Json<RouteResponse>, AppError> {
    let Json(body) = body?;
    let request = body.into_request();

    let assembler = RouteAssembler::new(state.maps.as_ref(), state.geocoder.as_ref());
    let route = assembler.assemble_until(&request, &state.shutdown).await?;

    Ok(Json(RouteResponse::from_route(&route)))
}

/// Ordered itinerary of a trip.
async fn trip_itinerary(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Json<ItineraryResponse>, AppError> {
    let trip_id = TripId::new(trip_id);

    let assembler = ItineraryAssembler::new(state.trips.as_ref());
    let itinerary = assembler.load(&trip_id).await?;

    Ok(Json(ItineraryResponse::from_itinerary(&itinerary)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unprocessable { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        let message = e.to_string();
        match e {
            RouteError::InvalidRequest(_) => AppError::BadRequest { message },
            RouteError::NoRouteFound => AppError::NotFound { message },
            RouteError::MalformedPath(_) | RouteError::Lookup(_) => {
                AppError::BadGateway { message }
            }
            RouteError::Cancelled(_) => AppError::Internal { message },
        }
    }
}

impl From<ItineraryError> for AppError {
    fn from(e: ItineraryError) -> Self {
        let message = e.to_string();
        match e {
            ItineraryError::DuplicateStintSequence { .. }
            | ItineraryError::DuplicateEntrySequence { .. }
            | ItineraryError::StintSequenceExhausted { .. }
            | ItineraryError::EntrySequenceExhausted { .. }
            | ItineraryError::InvalidEntry { .. } => AppError::Unprocessable { message },
            ItineraryError::Fetch(TripError::NotFound(_)) => AppError::NotFound { message },
            ItineraryError::Fetch(_) => AppError::BadGateway { message },
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::Unprocessable { message }
            | AppError::BadGateway { message }
            | AppError::Internal { message } => message,
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), %message, "request failed");
        } else {
            warn!(status = status.as_u16(), %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
