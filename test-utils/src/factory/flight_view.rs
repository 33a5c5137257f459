//! Flight view history factory for creating test view entities.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating view history rows with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let view = FlightViewFactory::new(&db, user.id, flight.id)
///     .view_count(3)
///     .build()
///     .await?;
/// ```
pub struct FlightViewFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    flight_id: i32,
    viewed_at: DateTime<Utc>,
    view_count: i32,
}

impl<'a> FlightViewFactory<'a> {
    /// Creates a new FlightViewFactory for the given user and flight.
    ///
    /// Defaults:
    /// - viewed_at: now
    /// - view_count: `1`
    pub fn new(db: &'a DatabaseConnection, user_id: i32, flight_id: i32) -> Self {
        Self {
            db,
            user_id,
            flight_id,
            viewed_at: Utc::now(),
            view_count: 1,
        }
    }

    pub fn viewed_at(mut self, viewed_at: DateTime<Utc>) -> Self {
        self.viewed_at = viewed_at;
        self
    }

    pub fn view_count(mut self, view_count: i32) -> Self {
        self.view_count = view_count;
        self
    }

    /// Builds and inserts the view history entity into the database.
    pub async fn build(self) -> Result<entity::flight_view_history::Model, DbErr> {
        entity::flight_view_history::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            flight_id: ActiveValue::Set(self.flight_id),
            viewed_at: ActiveValue::Set(self.viewed_at),
            view_count: ActiveValue::Set(self.view_count),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a single view of `flight_id` by `user_id`, stamped now.
pub async fn create_flight_view(
    db: &DatabaseConnection,
    user_id: i32,
    flight_id: i32,
) -> Result<entity::flight_view_history::Model, DbErr> {
    FlightViewFactory::new(db, user_id, flight_id).build().await
}
