//! Flight subscription data repository.
//!
//! Provides `FlightSubscriptionRepository` for reading and writing subscription rows.
//! Subscriptions are never deleted: cancellation and reactivation are status updates
//! on the same row. The partial unique index `uq_flight_subscription_active` rejects a
//! second ACTIVE row for the same (flight, user) pair.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::{flight::FlightRepository, user::UserRepository},
    model::subscription::{
        CreateSubscriptionParam, FlightSubscription, FlightSubscriptionDetails,
        NotificationTypes, SubscriptionStatus,
    },
};

/// Repository providing database operations for flight subscriptions.
pub struct FlightSubscriptionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> FlightSubscriptionRepository<'a, C> {
    /// Creates a new FlightSubscriptionRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection or an open transaction
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new ACTIVE subscription with the default notification types.
    ///
    /// # Arguments
    /// - `param` - Flight, user and optional device token
    ///
    /// # Returns
    /// - `Ok(FlightSubscription)` - The created subscription
    /// - `Err(DbErr)` - Database error, including a unique violation when the pair
    ///   already has an ACTIVE subscription
    pub async fn create(&self, param: CreateSubscriptionParam) -> Result<FlightSubscription, DbErr> {
        let entity = entity::flight_subscription::ActiveModel {
            flight_id: ActiveValue::Set(param.flight_id),
            user_id: ActiveValue::Set(param.user_id),
            status: ActiveValue::Set(SubscriptionStatus::Active.as_str().to_string()),
            notification_types: ActiveValue::Set(NotificationTypes::default().to_string()),
            device_token: ActiveValue::Set(param.device_token),
            created_at: ActiveValue::Set(Utc::now()),
            last_notified_at: ActiveValue::Set(None),
            notify_before_hours: ActiveValue::Set(None),
            min_delay_minutes: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        FlightSubscription::from_entity(entity)
    }

    /// Finds a subscription by ID regardless of status.
    pub async fn find_by_id(&self, subscription_id: i32) -> Result<Option<FlightSubscription>, DbErr> {
        entity::prelude::FlightSubscription::find_by_id(subscription_id)
            .one(self.db)
            .await?
            .map(FlightSubscription::from_entity)
            .transpose()
    }

    /// Finds the ACTIVE subscription for a (flight, user) pair.
    ///
    /// # Returns
    /// - `Ok(Some(FlightSubscription))` - The pair has an ACTIVE subscription
    /// - `Ok(None)` - No ACTIVE subscription for the pair
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_active(
        &self,
        flight_id: i32,
        user_id: i32,
    ) -> Result<Option<FlightSubscription>, DbErr> {
        entity::prelude::FlightSubscription::find()
            .filter(entity::flight_subscription::Column::FlightId.eq(flight_id))
            .filter(entity::flight_subscription::Column::UserId.eq(user_id))
            .filter(
                entity::flight_subscription::Column::Status
                    .eq(SubscriptionStatus::Active.as_str()),
            )
            .one(self.db)
            .await?
            .map(FlightSubscription::from_entity)
            .transpose()
    }

    /// Finds the most recently created subscription of any status for a (flight, user) pair.
    ///
    /// Used to pick the row to reactivate. When a pair has several rows the newest one wins.
    pub async fn find_latest(
        &self,
        flight_id: i32,
        user_id: i32,
    ) -> Result<Option<FlightSubscription>, DbErr> {
        entity::prelude::FlightSubscription::find()
            .filter(entity::flight_subscription::Column::FlightId.eq(flight_id))
            .filter(entity::flight_subscription::Column::UserId.eq(user_id))
            .order_by_desc(entity::flight_subscription::Column::Id)
            .one(self.db)
            .await?
            .map(FlightSubscription::from_entity)
            .transpose()
    }

    /// Sets a subscription back to ACTIVE with the default notification types.
    ///
    /// # Arguments
    /// - `subscription_id` - Row to reactivate
    /// - `device_token` - Replaces the stored token when `Some`; `None` keeps it
    ///
    /// # Returns
    /// - `Ok(FlightSubscription)` - The reactivated subscription
    /// - `Err(DbErr)` - Database error, including a unique violation on a concurrent subscribe
    pub async fn reactivate(
        &self,
        subscription_id: i32,
        device_token: Option<String>,
    ) -> Result<FlightSubscription, DbErr> {
        let device_token = match device_token {
            Some(token) => ActiveValue::Set(Some(token)),
            None => ActiveValue::NotSet,
        };

        let entity = entity::flight_subscription::ActiveModel {
            id: ActiveValue::Unchanged(subscription_id),
            status: ActiveValue::Set(SubscriptionStatus::Active.as_str().to_string()),
            notification_types: ActiveValue::Set(NotificationTypes::default().to_string()),
            device_token,
            ..Default::default()
        }
        .update(self.db)
        .await?;

        FlightSubscription::from_entity(entity)
    }

    /// Marks a subscription CANCELLED. Cancelling a cancelled row leaves it unchanged.
    pub async fn cancel(&self, subscription_id: i32) -> Result<FlightSubscription, DbErr> {
        let entity = entity::flight_subscription::ActiveModel {
            id: ActiveValue::Unchanged(subscription_id),
            status: ActiveValue::Set(SubscriptionStatus::Cancelled.as_str().to_string()),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        FlightSubscription::from_entity(entity)
    }

    /// Records when the subscriber was last notified.
    pub async fn mark_notified(
        &self,
        subscription_id: i32,
        notified_at: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        entity::flight_subscription::ActiveModel {
            id: ActiveValue::Unchanged(subscription_id),
            last_notified_at: ActiveValue::Set(Some(notified_at)),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    /// Gets all ACTIVE subscriptions of a user in ascending ID order.
    pub async fn find_active_by_user_id(&self, user_id: i32) -> Result<Vec<FlightSubscription>, DbErr> {
        entity::prelude::FlightSubscription::find()
            .filter(entity::flight_subscription::Column::UserId.eq(user_id))
            .filter(
                entity::flight_subscription::Column::Status
                    .eq(SubscriptionStatus::Active.as_str()),
            )
            .order_by_asc(entity::flight_subscription::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(FlightSubscription::from_entity)
            .collect()
    }

    /// Gets all ACTIVE subscriptions for a flight in ascending ID order.
    pub async fn find_active_by_flight_id(
        &self,
        flight_id: i32,
    ) -> Result<Vec<FlightSubscription>, DbErr> {
        entity::prelude::FlightSubscription::find()
            .filter(entity::flight_subscription::Column::FlightId.eq(flight_id))
            .filter(
                entity::flight_subscription::Column::Status
                    .eq(SubscriptionStatus::Active.as_str()),
            )
            .order_by_asc(entity::flight_subscription::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(FlightSubscription::from_entity)
            .collect()
    }

    /// Counts ACTIVE subscriptions for a flight.
    pub async fn count_active_for_flight(&self, flight_id: i32) -> Result<u64, DbErr> {
        entity::prelude::FlightSubscription::find()
            .filter(entity::flight_subscription::Column::FlightId.eq(flight_id))
            .filter(
                entity::flight_subscription::Column::Status
                    .eq(SubscriptionStatus::Active.as_str()),
            )
            .count(self.db)
            .await
    }

    /// Counts ACTIVE subscriptions for each of the given flights.
    ///
    /// Flights without ACTIVE subscriptions are absent from the map.
    pub async fn count_active_for_flights(
        &self,
        flight_ids: &[i32],
    ) -> Result<HashMap<i32, u64>, DbErr> {
        if flight_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let subscriptions = entity::prelude::FlightSubscription::find()
            .filter(
                entity::flight_subscription::Column::FlightId.is_in(flight_ids.iter().copied()),
            )
            .filter(
                entity::flight_subscription::Column::Status
                    .eq(SubscriptionStatus::Active.as_str()),
            )
            .all(self.db)
            .await?;

        let mut counts = HashMap::new();
        for subscription in subscriptions {
            *counts.entry(subscription.flight_id).or_insert(0) += 1;
        }

        Ok(counts)
    }

    /// Joins subscriptions with their flights and users, keeping the input order.
    ///
    /// Loads all referenced flights and users with one query each.
    ///
    /// # Returns
    /// - `Ok(Vec<FlightSubscriptionDetails>)` - One entry per input subscription
    /// - `Err(DbErr::RecordNotFound)` - A referenced flight or user row is missing
    /// - `Err(DbErr)` - Other database error
    pub async fn expand(
        &self,
        subscriptions: Vec<FlightSubscription>,
    ) -> Result<Vec<FlightSubscriptionDetails>, DbErr> {
        let flight_ids: Vec<i32> = subscriptions.iter().map(|s| s.flight_id).collect();
        let user_ids: Vec<i32> = subscriptions.iter().map(|s| s.user_id).collect();

        let flights: HashMap<i32, _> = FlightRepository::new(self.db)
            .find_by_ids(&flight_ids)
            .await?
            .into_iter()
            .map(|flight| (flight.id, flight))
            .collect();
        let users: HashMap<i32, _> = UserRepository::new(self.db)
            .find_by_ids(&user_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        subscriptions
            .into_iter()
            .map(|subscription| {
                let flight = flights.get(&subscription.flight_id).cloned().ok_or_else(|| {
                    DbErr::RecordNotFound(format!(
                        "Flight {} referenced by subscription {}",
                        subscription.flight_id, subscription.id
                    ))
                })?;
                let user = users.get(&subscription.user_id).cloned().ok_or_else(|| {
                    DbErr::RecordNotFound(format!(
                        "User {} referenced by subscription {}",
                        subscription.user_id, subscription.id
                    ))
                })?;

                Ok(FlightSubscriptionDetails {
                    subscription,
                    flight,
                    user,
                })
            })
            .collect()
    }

    /// Joins a single subscription with its flight and user.
    pub async fn expand_one(
        &self,
        subscription: FlightSubscription,
    ) -> Result<FlightSubscriptionDetails, DbErr> {
        let subscription_id = subscription.id;

        self.expand(vec![subscription])
            .await?
            .pop()
            .ok_or_else(|| DbErr::RecordNotFound(format!("Subscription {}", subscription_id)))
    }
}
