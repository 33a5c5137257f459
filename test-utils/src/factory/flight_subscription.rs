//! Flight subscription factory for creating test subscription entities.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test subscriptions with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let cancelled = FlightSubscriptionFactory::new(&db, flight.id, user.id)
///     .status("CANCELLED")
///     .device_token(Some("tok1"))
///     .build()
///     .await?;
/// ```
pub struct FlightSubscriptionFactory<'a> {
    db: &'a DatabaseConnection,
    flight_id: i32,
    user_id: i32,
    status: String,
    notification_types: String,
    device_token: Option<String>,
    min_delay_minutes: Option<i32>,
}

impl<'a> FlightSubscriptionFactory<'a> {
    /// Creates a new factory with default values.
    ///
    /// Defaults:
    /// - status: `"ACTIVE"`
    /// - notification_types: `"DELAY,CANCELLATION,STATUS_CHANGE"`
    /// - device_token / min_delay_minutes: `None`
    pub fn new(db: &'a DatabaseConnection, flight_id: i32, user_id: i32) -> Self {
        Self {
            db,
            flight_id,
            user_id,
            status: "ACTIVE".to_string(),
            notification_types: "DELAY,CANCELLATION,STATUS_CHANGE".to_string(),
            device_token: None,
            min_delay_minutes: None,
        }
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn notification_types(mut self, notification_types: impl Into<String>) -> Self {
        self.notification_types = notification_types.into();
        self
    }

    pub fn device_token(mut self, device_token: Option<&str>) -> Self {
        self.device_token = device_token.map(str::to_string);
        self
    }

    pub fn min_delay_minutes(mut self, min_delay_minutes: Option<i32>) -> Self {
        self.min_delay_minutes = min_delay_minutes;
        self
    }

    /// Builds and inserts the subscription entity into the database.
    pub async fn build(self) -> Result<entity::flight_subscription::Model, DbErr> {
        entity::flight_subscription::ActiveModel {
            flight_id: ActiveValue::Set(self.flight_id),
            user_id: ActiveValue::Set(self.user_id),
            status: ActiveValue::Set(self.status),
            notification_types: ActiveValue::Set(self.notification_types),
            device_token: ActiveValue::Set(self.device_token),
            created_at: ActiveValue::Set(Utc::now()),
            last_notified_at: ActiveValue::Set(None),
            notify_before_hours: ActiveValue::Set(None),
            min_delay_minutes: ActiveValue::Set(self.min_delay_minutes),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an ACTIVE subscription with default notification types.
pub async fn create_subscription(
    db: &DatabaseConnection,
    flight_id: i32,
    user_id: i32,
) -> Result<entity::flight_subscription::Model, DbErr> {
    FlightSubscriptionFactory::new(db, flight_id, user_id)
        .build()
        .await
}
