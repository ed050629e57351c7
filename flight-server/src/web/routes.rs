//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::domain::{AirportCode, FlightTime};
use crate::planner::{Planner, SearchError, SearchRequest};

use super::dto::*;
use super::state::AppState;

/// Message returned alongside an empty result.
pub const NO_ITINERARIES: &str = "no itineraries found within the requested constraints";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/airports/search", get(search_airports))
        .route("/api/airports/:code", get(get_airport))
        .route("/api/itineraries", post(plan_itineraries))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search airports by code, name or city.
async fn search_airports(
    State(state): State<AppState>,
    Query(req): Query<AirportSearchRequest>,
) -> Json<AirportSearchResponse> {
    let limit = req.limit.unwrap_or(10).min(50);

    let airports = state
        .catalog
        .airports()
        .search(&req.q, limit)
        .into_iter()
        .map(AirportResult::from_airport)
        .collect();

    Json(AirportSearchResponse { airports })
}

/// Look up one airport by code.
async fn get_airport(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<AirportResult>, AppError> {
    let code = parse_code(&code, "airport")?;

    state
        .catalog
        .airports()
        .get(&code)
        .map(|airport| Json(AirportResult::from_airport(airport)))
        .ok_or_else(|| AppError::NotFound {
            message: format!("Unknown airport: {code}"),
        })
}

/// Plan itineraries between two airports.
async fn plan_itineraries(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ItineraryResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: ItineraryRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid itinerary request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let source = parse_code(&req.source, "source")?;
    let destination = parse_code(&req.destination, "destination")?;

    // Only the wall-clock time is user-supplied; the date is today's
    let date = Local::now().date_naive();
    let start = FlightTime::parse_hhmm(req.start.trim(), date).map_err(|e| AppError::BadRequest {
        message: format!("Invalid start time {:?}: {e}", req.start),
    })?;

    let request = SearchRequest::new(source, destination, start, req.duration_hours);
    let view = req.view.with_count(state.config.result_count(req.k));

    // Enumeration is CPU-bound; keep it off the async workers
    let planner_state = state.clone();
    let result = tokio::task::spawn_blocking(move || {
        Planner::new(
            &planner_state.catalog,
            planner_state.durations.as_ref(),
            &planner_state.config,
        )
        .search(&request)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("search task failed: {e}"),
    })??;

    let airports = state.catalog.airports();
    let itineraries: Vec<ItineraryResult> = view
        .select(&result.itineraries)
        .into_iter()
        .map(|it| ItineraryResult::from_itinerary(it, airports))
        .collect();

    info!(
        %source,
        %destination,
        %start,
        hours = req.duration_hours,
        found = result.itineraries.len(),
        returned = itineraries.len(),
        truncated = result.truncated,
        "planned itineraries"
    );

    let message = result
        .itineraries
        .is_empty()
        .then(|| NO_ITINERARIES.to_string());

    Ok(Json(ItineraryResponse {
        itineraries,
        total_found: result.itineraries.len(),
        truncated: result.truncated,
        message,
    }))
}

fn parse_code(raw: &str, what: &str) -> Result<AirportCode, AppError> {
    AirportCode::parse_normalized(raw).map_err(|_| AppError::BadRequest {
        message: format!("Invalid {what} airport code: {raw}"),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidRequest(msg) => AppError::BadRequest { message: msg },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
