use axum::{
    routing::{get, patch, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        auth::{get_user, login, logout, register},
        flight::{
            clear_view_history, get_flight, get_flight_by_number, get_view_history,
            search_flights, update_flight_status,
        },
        subscription::{
            get_flight_subscriptions, get_my_subscriptions, get_user_subscriptions, subscribe,
            unsubscribe,
        },
    },
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "SkyWatch API", description = "Flight status subscriptions"),
    paths(
        crate::server::controller::auth::register,
        crate::server::controller::auth::login,
        crate::server::controller::auth::logout,
        crate::server::controller::auth::get_user,
        crate::server::controller::subscription::subscribe,
        crate::server::controller::subscription::unsubscribe,
        crate::server::controller::subscription::get_user_subscriptions,
        crate::server::controller::subscription::get_my_subscriptions,
        crate::server::controller::subscription::get_flight_subscriptions,
        crate::server::controller::flight::search_flights,
        crate::server::controller::flight::get_flight_by_number,
        crate::server::controller::flight::get_flight,
        crate::server::controller::flight::get_view_history,
        crate::server::controller::flight::clear_view_history,
        crate::server::controller::flight::update_flight_status,
    ),
    tags(
        (name = "auth", description = "Account registration and session login"),
        (name = "subscription", description = "Flight status subscriptions"),
        (name = "flight", description = "Flight search, view history and status updates")
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", get(logout))
        .route("/api/auth/user", get(get_user))
        .route("/api/subscriptions/subscribe", post(subscribe))
        .route("/api/subscriptions/unsubscribe", post(unsubscribe))
        .route("/api/subscriptions/me", get(get_my_subscriptions))
        .route("/api/subscriptions/user/{email}", get(get_user_subscriptions))
        .route(
            "/api/subscriptions/flight/{flight_number}",
            get(get_flight_subscriptions),
        )
        .route("/api/flights", get(search_flights))
        .route(
            "/api/flights/number/{flight_number}",
            get(get_flight_by_number),
        )
        .route(
            "/api/flights/history/me",
            get(get_view_history).delete(clear_view_history),
        )
        .route("/api/flights/{id}", get(get_flight))
        .route("/api/flights/{id}/status", patch(update_flight_status))
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
}
