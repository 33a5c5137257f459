//! Flight subscription lifecycle.
//!
//! `FlightSubscriptionService` implements subscribe and unsubscribe with reactivation:
//! a (flight, user) pair keeps reusing the same row, flipping between ACTIVE and
//! CANCELLED. Each write runs in one transaction and the partial unique index on ACTIVE
//! rows closes the race between two concurrent subscribes. Confirmations are sent after
//! commit and never affect the result.

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, SqlErr, TransactionTrait};

use crate::server::{
    data::{
        flight::FlightRepository, subscription::FlightSubscriptionRepository,
        user::UserRepository,
    },
    error::{subscription::SubscriptionError, AppError},
    model::{
        flight::Flight,
        subscription::{
            CreateSubscriptionParam, FlightRef, FlightSubscriptionDetails, SubscribeParam,
            UnsubscribeTarget,
        },
        user::User,
    },
    service::notification::{NotificationDispatcher, NotificationService},
};

pub struct FlightSubscriptionService<'a> {
    db: &'a DatabaseConnection,
    notifications: NotificationService<'a>,
}

impl<'a> FlightSubscriptionService<'a> {
    /// Creates a new FlightSubscriptionService instance.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `dispatcher` - Delivery channel for subscription confirmations
    pub fn new(db: &'a DatabaseConnection, dispatcher: &'a dyn NotificationDispatcher) -> Self {
        Self {
            db,
            notifications: NotificationService::new(dispatcher),
        }
    }

    /// Subscribes `user` to a flight, reactivating an earlier subscription when one exists.
    ///
    /// Reactivation resets the notification types to the default set and overwrites the
    /// device token only when a new one was supplied.
    ///
    /// # Arguments
    /// - `user` - The authenticated caller
    /// - `param` - Target flight and optional device token
    ///
    /// # Returns
    /// - `Ok(FlightSubscriptionDetails)` - The ACTIVE subscription with flight and user
    /// - `Err(SubscriptionError::FlightIdNotFound)` / `FlightNotFound` - Unknown flight
    /// - `Err(SubscriptionError::UserNotFound)` - The caller no longer exists
    /// - `Err(SubscriptionError::AlreadySubscribed)` - An ACTIVE subscription exists
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn subscribe(
        &self,
        user: &User,
        param: SubscribeParam,
    ) -> Result<FlightSubscriptionDetails, AppError> {
        let txn = self.db.begin().await?;

        let flight = resolve_flight(&txn, &param.flight).await?;
        let user = UserRepository::new(&txn)
            .find_by_email(&user.email)
            .await?
            .ok_or_else(|| SubscriptionError::UserNotFound(user.email.clone()))?;

        let subscription_repo = FlightSubscriptionRepository::new(&txn);

        if subscription_repo
            .find_active(flight.id, user.id)
            .await?
            .is_some()
        {
            return Err(SubscriptionError::AlreadySubscribed(flight.flight_number).into());
        }

        let written = match subscription_repo.find_latest(flight.id, user.id).await? {
            Some(existing) => {
                subscription_repo
                    .reactivate(existing.id, param.device_token)
                    .await
            }
            None => {
                subscription_repo
                    .create(CreateSubscriptionParam {
                        flight_id: flight.id,
                        user_id: user.id,
                        device_token: param.device_token,
                    })
                    .await
            }
        };
        let subscription = written.map_err(|e| conflict_or_db_error(e, &flight.flight_number))?;

        txn.commit().await?;

        tracing::info!(
            subscription_id = subscription.id,
            flight_number = %flight.flight_number,
            user_id = user.id,
            "Subscription active"
        );

        let details = FlightSubscriptionDetails {
            subscription,
            flight,
            user,
        };

        self.notifications.confirm_subscription(&details).await;

        Ok(details)
    }

    /// Cancels one of `user`'s subscriptions.
    ///
    /// By subscription ID the row is cancelled whatever its current status, so repeating
    /// the call succeeds. By flight the caller must hold an ACTIVE subscription.
    ///
    /// # Returns
    /// - `Ok(FlightSubscriptionDetails)` - The CANCELLED subscription
    /// - `Err(SubscriptionError::SubscriptionNotFound)` - Unknown ID or owned by another user
    /// - `Err(SubscriptionError::FlightIdNotFound)` / `FlightNotFound` - Unknown flight
    /// - `Err(SubscriptionError::NoActiveSubscription)` - Nothing to cancel for the flight
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn unsubscribe(
        &self,
        user: &User,
        target: UnsubscribeTarget,
    ) -> Result<FlightSubscriptionDetails, AppError> {
        let txn = self.db.begin().await?;
        let subscription_repo = FlightSubscriptionRepository::new(&txn);

        let subscription = match target {
            UnsubscribeTarget::Subscription(subscription_id) => subscription_repo
                .find_by_id(subscription_id)
                .await?
                .filter(|subscription| subscription.user_id == user.id)
                .ok_or(SubscriptionError::SubscriptionNotFound(subscription_id))?,
            UnsubscribeTarget::Flight(flight_ref) => {
                let flight = resolve_flight(&txn, &flight_ref).await?;

                subscription_repo
                    .find_active(flight.id, user.id)
                    .await?
                    .ok_or(SubscriptionError::NoActiveSubscription(flight.flight_number))?
            }
        };

        let cancelled = subscription_repo.cancel(subscription.id).await?;
        let details = subscription_repo.expand_one(cancelled).await?;

        txn.commit().await?;

        tracing::info!(
            subscription_id = details.subscription.id,
            flight_number = %details.flight.flight_number,
            user_id = details.user.id,
            "Subscription cancelled"
        );

        Ok(details)
    }

    /// Gets the ACTIVE subscriptions of the user with `email`, oldest first.
    ///
    /// # Returns
    /// - `Ok(Vec<FlightSubscriptionDetails>)` - Empty when the email is unknown
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn get_user_subscriptions(
        &self,
        email: &str,
    ) -> Result<Vec<FlightSubscriptionDetails>, AppError> {
        let Some(user) = UserRepository::new(self.db).find_by_email(email).await? else {
            return Ok(Vec::new());
        };

        self.get_subscriptions_by_user_id(user.id).await
    }

    /// Gets the ACTIVE subscriptions of a user by ID, oldest first.
    pub async fn get_subscriptions_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Vec<FlightSubscriptionDetails>, AppError> {
        let repo = FlightSubscriptionRepository::new(self.db);

        let subscriptions = repo.find_active_by_user_id(user_id).await?;

        Ok(repo.expand(subscriptions).await?)
    }

    /// Gets the ACTIVE subscriptions for a flight number, oldest first.
    ///
    /// # Returns
    /// - `Ok(Vec<FlightSubscriptionDetails>)` - Empty when the flight is unknown
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn get_subscriptions_for_flight(
        &self,
        flight_number: &str,
    ) -> Result<Vec<FlightSubscriptionDetails>, AppError> {
        let Some(flight) = FlightRepository::new(self.db)
            .find_by_number(flight_number)
            .await?
        else {
            return Ok(Vec::new());
        };

        let repo = FlightSubscriptionRepository::new(self.db);
        let subscriptions = repo.find_active_by_flight_id(flight.id).await?;

        Ok(repo.expand(subscriptions).await?)
    }
}

/// Loads the flight a request refers to.
async fn resolve_flight<C: ConnectionTrait>(db: &C, flight_ref: &FlightRef) -> Result<Flight, AppError> {
    let repo = FlightRepository::new(db);

    let flight = match flight_ref {
        FlightRef::Id(flight_id) => repo
            .find_by_id(*flight_id)
            .await?
            .ok_or(SubscriptionError::FlightIdNotFound(*flight_id))?,
        FlightRef::Number(flight_number) => repo
            .find_by_number(flight_number)
            .await?
            .ok_or_else(|| SubscriptionError::FlightNotFound(flight_number.clone()))?,
    };

    Ok(flight)
}

/// A unique violation while writing means another request activated the pair first.
fn conflict_or_db_error(err: DbErr, flight_number: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            SubscriptionError::AlreadySubscribed(flight_number.to_string()).into()
        }
        _ => err.into(),
    }
}
