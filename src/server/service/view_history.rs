//! Per-user flight view history.

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{flight::FlightRepository, flight_view::FlightViewRepository, user::UserRepository},
    error::{auth::AuthError, subscription::SubscriptionError, AppError},
    model::flight_view::{FlightView, FlightViewDetails},
};

pub struct FlightViewHistoryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FlightViewHistoryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records one view of a flight by a user.
    ///
    /// # Returns
    /// - `Ok(FlightView)` - History row with the updated count
    /// - `Err(AuthError::UserNotInDatabase)` - Unknown user
    /// - `Err(SubscriptionError::FlightIdNotFound)` - Unknown flight
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn record_view(&self, user_id: i32, flight_id: i32) -> Result<FlightView, AppError> {
        if UserRepository::new(self.db).find_by_id(user_id).await?.is_none() {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        }
        if FlightRepository::new(self.db)
            .find_by_id(flight_id)
            .await?
            .is_none()
        {
            return Err(SubscriptionError::FlightIdNotFound(flight_id).into());
        }

        let view = FlightViewRepository::new(self.db)
            .record_view(user_id, flight_id, Utc::now())
            .await?;

        tracing::debug!(
            user_id,
            flight_id,
            view_count = view.view_count,
            "Recorded flight view"
        );

        Ok(view)
    }

    /// Gets a user's viewed flights, most recent first.
    ///
    /// # Arguments
    /// - `user_id` - Owner of the history
    /// - `limit` - Maximum number of entries; `None` returns the full history
    pub async fn get_recent_views(
        &self,
        user_id: i32,
        limit: Option<u64>,
    ) -> Result<Vec<FlightViewDetails>, AppError> {
        Ok(FlightViewRepository::new(self.db)
            .find_recent_by_user_id(user_id, limit)
            .await?)
    }

    /// Deletes a user's whole view history.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of removed entries
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn clear_history(&self, user_id: i32) -> Result<u64, AppError> {
        let removed = FlightViewRepository::new(self.db)
            .delete_by_user_id(user_id)
            .await?;

        tracing::info!(user_id, removed, "Cleared flight view history");

        Ok(removed)
    }
}
