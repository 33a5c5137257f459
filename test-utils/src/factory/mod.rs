//! Factory methods for creating test data.
//!
//! Each entity has a `Factory` builder for customization and a `create_*` convenience
//! function for quick default creation. Factories insert rows immediately, so the
//! referenced rows must already exist.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::user::create_user(&db).await?;
//! let flight = factory::flight::FlightFactory::new(&db)
//!     .flight_number("SU100")
//!     .build()
//!     .await?;
//! let subscription = factory::create_subscription(&db, flight.id, user.id).await?;
//! ```

pub mod flight;
pub mod flight_subscription;
pub mod flight_view;
pub mod helpers;
pub mod user;

// Re-export commonly used factory functions for concise usage
pub use flight::create_flight;
pub use flight_subscription::create_subscription;
pub use flight_view::create_flight_view;
pub use user::create_user;
