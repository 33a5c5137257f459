//! HTTP request handlers.
//!
//! Controllers authenticate the request, convert DTOs into domain parameters, call a
//! service and convert the result back into a DTO. They hold no business logic.

pub mod auth;
pub mod flight;
pub mod subscription;
