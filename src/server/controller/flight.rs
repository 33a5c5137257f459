use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        flight::{FlightDto, FlightSearchQuery, FlightStatusUpdateDto, UpdateFlightStatusDto},
        flight_view::{FlightViewDto, ViewHistoryQuery},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            flight::{FlightFilter, FlightStatus, UpdateFlightStatusParam},
            flight_view::FlightViewDetails,
        },
        service::{flight::FlightService, view_history::FlightViewHistoryService},
        state::AppState,
    },
};

/// Tag for grouping flight endpoints in OpenAPI documentation
pub static FLIGHT_TAG: &str = "flight";

/// Search flights by departure airport, arrival airport and status.
///
/// Every filter is optional; without filters all flights are returned. An empty list
/// means nothing matched.
#[utoipa::path(
    get,
    path = "/api/flights",
    tag = FLIGHT_TAG,
    params(FlightSearchQuery),
    responses(
        (status = 200, description = "Matching flights", body = Vec<FlightDto>),
        (status = 400, description = "Unknown status", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_flights(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<FlightSearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = FlightFilter::from_query(query)?;

    let _ = AuthGuard::new(&state.db, &session).require().await?;

    let service = FlightService::new(&state.db, state.notifier.as_ref());

    let flights: Vec<FlightDto> = service
        .search_flights(&filter)
        .await?
        .into_iter()
        .map(|overview| overview.flight.into_dto(overview.subscription_count))
        .collect();

    Ok((StatusCode::OK, Json(flights)))
}

/// Get a flight by its flight number, e.g. `SU100`.
#[utoipa::path(
    get,
    path = "/api/flights/number/{flight_number}",
    tag = FLIGHT_TAG,
    params(
        ("flight_number" = String, Path, description = "Flight number, e.g. SU100")
    ),
    responses(
        (status = 200, description = "Flight found", body = FlightDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Flight not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_flight_by_number(
    State(state): State<AppState>,
    session: Session,
    Path(flight_number): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require().await?;

    let service = FlightService::new(&state.db, state.notifier.as_ref());

    let Some(overview) = service.get_flight_by_number(&flight_number).await? else {
        return Err(AppError::NotFound(format!(
            "Flight {} not found",
            flight_number
        )));
    };

    Ok((
        StatusCode::OK,
        Json(overview.flight.into_dto(overview.subscription_count)),
    ))
}

/// Get a flight by ID with its number of active subscriptions.
///
/// The view is added to the caller's view history.
#[utoipa::path(
    get,
    path = "/api/flights/{id}",
    tag = FLIGHT_TAG,
    params(
        ("id" = i32, Path, description = "Flight ID")
    ),
    responses(
        (status = 200, description = "Flight found", body = FlightDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Flight not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_flight(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require().await?;

    let service = FlightService::new(&state.db, state.notifier.as_ref());

    let Some(overview) = service.get_flight(id, Some(user.id)).await? else {
        return Err(AppError::NotFound(format!("Flight with id {} not found", id)));
    };

    Ok((
        StatusCode::OK,
        Json(overview.flight.into_dto(overview.subscription_count)),
    ))
}

/// Update a flight's status and notify eligible subscribers.
///
/// # Access Control
/// - Requires a logged-in user
///
/// # Returns
/// - `200 OK` - Updated flight and number of notified subscribers
/// - `400 Bad Request` - Unknown status or negative delay
/// - `401 Unauthorized` - Not logged in
/// - `404 Not Found` - Unknown flight
#[utoipa::path(
    patch,
    path = "/api/flights/{id}/status",
    tag = FLIGHT_TAG,
    params(
        ("id" = i32, Path, description = "Flight ID")
    ),
    request_body = UpdateFlightStatusDto,
    responses(
        (status = 200, description = "Status updated", body = FlightStatusUpdateDto),
        (status = 400, description = "Invalid status update", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Flight not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_flight_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateFlightStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let Some(status) = FlightStatus::parse(&payload.status) else {
        return Err(AppError::BadRequest(format!(
            "Unknown flight status '{}'",
            payload.status
        )));
    };
    if payload.delay_minutes.is_some_and(|delay| delay < 0) {
        return Err(AppError::BadRequest(
            "Delay minutes must not be negative".to_string(),
        ));
    }

    let _ = AuthGuard::new(&state.db, &session).require().await?;

    let service = FlightService::new(&state.db, state.notifier.as_ref());

    let update = service
        .update_status(
            id,
            UpdateFlightStatusParam {
                status,
                delay_minutes: payload.delay_minutes,
            },
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(FlightStatusUpdateDto {
            flight: update
                .overview
                .flight
                .into_dto(update.overview.subscription_count),
            notified: update.notified,
        }),
    ))
}

/// Get the logged-in user's viewed flights, most recent first.
#[utoipa::path(
    get,
    path = "/api/flights/history/me",
    tag = FLIGHT_TAG,
    params(ViewHistoryQuery),
    responses(
        (status = 200, description = "View history", body = Vec<FlightViewDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_view_history(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ViewHistoryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require().await?;

    let service = FlightViewHistoryService::new(&state.db);

    let views: Vec<FlightViewDto> = service
        .get_recent_views(user.id, query.limit)
        .await?
        .into_iter()
        .map(FlightViewDetails::into_dto)
        .collect();

    Ok((StatusCode::OK, Json(views)))
}

/// Clear the logged-in user's view history.
#[utoipa::path(
    delete,
    path = "/api/flights/history/me",
    tag = FLIGHT_TAG,
    responses(
        (status = 204, description = "History cleared"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn clear_view_history(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require().await?;

    FlightViewHistoryService::new(&state.db)
        .clear_history(user.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
