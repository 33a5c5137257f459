use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        subscription::{FlightSubscriptionDto, SubscribeDto, UnsubscribeDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::subscription::{FlightSubscriptionDetails, SubscribeParam, UnsubscribeTarget},
        service::subscription::FlightSubscriptionService,
        state::AppState,
    },
};

/// Tag for grouping subscription endpoints in OpenAPI documentation
pub static SUBSCRIPTION_TAG: &str = "subscription";

fn into_dtos(subscriptions: Vec<FlightSubscriptionDetails>) -> Vec<FlightSubscriptionDto> {
    subscriptions
        .into_iter()
        .map(FlightSubscriptionDetails::into_dto)
        .collect()
}

/// Subscribe the logged-in user to a flight.
///
/// The flight is identified by `flightNumber` or `flightId`; the number wins when both
/// are sent. A previously cancelled subscription for the same flight is reactivated
/// instead of creating a new one.
///
/// # Access Control
/// - Requires a logged-in user
///
/// # Returns
/// - `200 OK` - The ACTIVE subscription
/// - `400 Bad Request` - No flight identifier
/// - `401 Unauthorized` - Not logged in
/// - `404 Not Found` - Unknown flight
/// - `409 Conflict` - Already subscribed
#[utoipa::path(
    post,
    path = "/api/subscriptions/subscribe",
    tag = SUBSCRIPTION_TAG,
    request_body = SubscribeDto,
    responses(
        (status = 200, description = "Subscription is active", body = FlightSubscriptionDto),
        (status = 400, description = "No flight identifier", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Flight not found", body = ErrorDto),
        (status = 409, description = "Already subscribed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn subscribe(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<SubscribeDto>,
) -> Result<impl IntoResponse, AppError> {
    let param = SubscribeParam::from_dto(payload)?;

    let user = AuthGuard::new(&state.db, &session).require().await?;

    let service = FlightSubscriptionService::new(&state.db, state.notifier.as_ref());

    let subscription = service.subscribe(&user, param).await?;

    Ok((StatusCode::OK, Json(subscription.into_dto())))
}

/// Cancel one of the logged-in user's subscriptions.
///
/// Sending `subscriptionId` cancels that subscription, even if it is already cancelled.
/// Otherwise `flightNumber` or `flightId` selects the user's ACTIVE subscription for the
/// flight.
///
/// # Access Control
/// - Requires a logged-in user; subscriptions of other users are reported as not found
///
/// # Returns
/// - `204 No Content` - Subscription cancelled
/// - `400 Bad Request` - No identifier
/// - `401 Unauthorized` - Not logged in
/// - `404 Not Found` - Unknown subscription or flight, or no active subscription
#[utoipa::path(
    post,
    path = "/api/subscriptions/unsubscribe",
    tag = SUBSCRIPTION_TAG,
    request_body = UnsubscribeDto,
    responses(
        (status = 204, description = "Subscription cancelled"),
        (status = 400, description = "No identifier", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Subscription not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn unsubscribe(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<UnsubscribeDto>,
) -> Result<impl IntoResponse, AppError> {
    let target = UnsubscribeTarget::from_dto(payload)?;

    let user = AuthGuard::new(&state.db, &session).require().await?;

    let service = FlightSubscriptionService::new(&state.db, state.notifier.as_ref());

    service.unsubscribe(&user, target).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get the ACTIVE subscriptions of the user with the given email.
#[utoipa::path(
    get,
    path = "/api/subscriptions/user/{email}",
    tag = SUBSCRIPTION_TAG,
    params(
        ("email" = String, Path, description = "User email")
    ),
    responses(
        (status = 200, description = "Active subscriptions, empty for unknown users", body = Vec<FlightSubscriptionDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user_subscriptions(
    State(state): State<AppState>,
    session: Session,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require().await?;

    let service = FlightSubscriptionService::new(&state.db, state.notifier.as_ref());

    let subscriptions = service.get_user_subscriptions(&email).await?;

    Ok((StatusCode::OK, Json(into_dtos(subscriptions))))
}

/// Get the logged-in user's ACTIVE subscriptions.
#[utoipa::path(
    get,
    path = "/api/subscriptions/me",
    tag = SUBSCRIPTION_TAG,
    responses(
        (status = 200, description = "Active subscriptions", body = Vec<FlightSubscriptionDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_my_subscriptions(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require().await?;

    let service = FlightSubscriptionService::new(&state.db, state.notifier.as_ref());

    let subscriptions = service.get_subscriptions_by_user_id(user.id).await?;

    Ok((StatusCode::OK, Json(into_dtos(subscriptions))))
}

/// Get the ACTIVE subscriptions for a flight number.
#[utoipa::path(
    get,
    path = "/api/subscriptions/flight/{flight_number}",
    tag = SUBSCRIPTION_TAG,
    params(
        ("flight_number" = String, Path, description = "Flight number, e.g. SU100")
    ),
    responses(
        (status = 200, description = "Active subscriptions, empty for unknown flights", body = Vec<FlightSubscriptionDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_flight_subscriptions(
    State(state): State<AppState>,
    session: Session,
    Path(flight_number): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require().await?;

    let service = FlightSubscriptionService::new(&state.db, state.notifier.as_ref());

    let subscriptions = service.get_subscriptions_for_flight(&flight_number).await?;

    Ok((StatusCode::OK, Json(into_dtos(subscriptions))))
}
