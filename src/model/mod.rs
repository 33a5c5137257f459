//! Data transfer objects shared by the HTTP API.
//!
//! These types define the JSON shapes of requests and responses. Field names are
//! serialized in camelCase and every DTO derives `ToSchema` for the OpenAPI document.

pub mod api;
pub mod flight;
pub mod flight_view;
pub mod subscription;
pub mod user;
