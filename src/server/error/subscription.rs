use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Errors raised by the subscription lifecycle.
#[derive(Error, Debug)]
pub enum SubscriptionError {
    /// No flight has the given flight number.
    #[error("Flight {0} not found")]
    FlightNotFound(String),

    /// No flight has the given numeric ID.
    #[error("Flight with id {0} not found")]
    FlightIdNotFound(i32),

    /// The user the subscription is for does not exist.
    #[error("User {0} not found")]
    UserNotFound(String),

    /// No subscription has the given ID, or it belongs to another user.
    #[error("Subscription {0} not found")]
    SubscriptionNotFound(i32),

    /// The user has no ACTIVE subscription for the flight.
    #[error("No active subscription for flight {0}")]
    NoActiveSubscription(String),

    /// The user already has an ACTIVE subscription for the flight.
    #[error("Already subscribed to flight {0}")]
    AlreadySubscribed(String),

    /// The request named neither a subscription nor a flight.
    #[error("Either a subscription id, a flight id or a flight number is required")]
    MissingTarget,
}

/// Converts subscription errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - `MissingTarget`
/// - 404 Not Found - Unknown flight, user or subscription, or no active subscription
/// - 409 Conflict - `AlreadySubscribed`
impl IntoResponse for SubscriptionError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::MissingTarget => StatusCode::BAD_REQUEST,
            Self::AlreadySubscribed(_) => StatusCode::CONFLICT,
            Self::FlightNotFound(_)
            | Self::FlightIdNotFound(_)
            | Self::UserNotFound(_)
            | Self::SubscriptionNotFound(_)
            | Self::NoActiveSubscription(_) => StatusCode::NOT_FOUND,
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
