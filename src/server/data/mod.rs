//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to maintain separation between the data layer and business logic layer.
//!
//! Repositories are generic over `ConnectionTrait` so the same methods run against the
//! connection pool or inside a `DatabaseTransaction` opened by a service.

pub mod flight;
pub mod flight_view;
pub mod subscription;
pub mod user;

#[cfg(test)]
mod test;
