//! SeaORM entity definitions for the flight subscription schema.

pub mod prelude;

pub mod flight;
pub mod flight_subscription;
pub mod flight_view_history;
pub mod user;
