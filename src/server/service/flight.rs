//! Flight lookups, search and status updates with subscriber fan-out.

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{flight::FlightRepository, subscription::FlightSubscriptionRepository},
    error::{subscription::SubscriptionError, AppError},
    model::flight::{Flight, FlightFilter, UpdateFlightStatusParam},
    service::{
        notification::{eligibility::FlightEvent, NotificationDispatcher, NotificationService},
        view_history::FlightViewHistoryService,
    },
};

/// Flight together with its number of ACTIVE subscriptions.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightOverview {
    pub flight: Flight,
    pub subscription_count: u64,
}

/// Result of a status update.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightStatusUpdate {
    pub overview: FlightOverview,
    pub event: Option<FlightEvent>,
    /// Subscribers whose notification was accepted by the dispatcher.
    pub notified: usize,
}

pub struct FlightService<'a> {
    db: &'a DatabaseConnection,
    notifications: NotificationService<'a>,
}

impl<'a> FlightService<'a> {
    pub fn new(db: &'a DatabaseConnection, dispatcher: &'a dyn NotificationDispatcher) -> Self {
        Self {
            db,
            notifications: NotificationService::new(dispatcher),
        }
    }

    /// Gets a flight with its ACTIVE subscription count.
    ///
    /// When `viewer_id` is given the view is added to that user's history. Recording is
    /// best-effort: a failure is logged and the flight is still returned.
    ///
    /// # Returns
    /// - `Ok(Some(FlightOverview))` - Flight found
    /// - `Ok(None)` - No flight with that ID
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn get_flight(
        &self,
        flight_id: i32,
        viewer_id: Option<i32>,
    ) -> Result<Option<FlightOverview>, AppError> {
        let Some(flight) = FlightRepository::new(self.db).find_by_id(flight_id).await? else {
            return Ok(None);
        };

        if let Some(user_id) = viewer_id {
            if let Err(e) = FlightViewHistoryService::new(self.db)
                .record_view(user_id, flight_id)
                .await
            {
                tracing::warn!(user_id, flight_id, "Failed to record flight view: {}", e);
            }
        }

        Ok(Some(self.overview(flight).await?))
    }

    /// Gets a flight by its flight number with its ACTIVE subscription count.
    ///
    /// # Returns
    /// - `Ok(Some(FlightOverview))` - Flight found
    /// - `Ok(None)` - No flight with that number
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn get_flight_by_number(
        &self,
        flight_number: &str,
    ) -> Result<Option<FlightOverview>, AppError> {
        let Some(flight) = FlightRepository::new(self.db)
            .find_by_number(flight_number)
            .await?
        else {
            return Ok(None);
        };

        Ok(Some(self.overview(flight).await?))
    }

    /// Searches flights by route and status.
    ///
    /// # Returns
    /// - `Ok(Vec<FlightOverview>)` - Matching flights by scheduled departure; empty when
    ///   nothing matches
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn search_flights(
        &self,
        filter: &FlightFilter,
    ) -> Result<Vec<FlightOverview>, AppError> {
        let flights = FlightRepository::new(self.db).search(filter).await?;

        let flight_ids: Vec<i32> = flights.iter().map(|flight| flight.id).collect();
        let counts = FlightSubscriptionRepository::new(self.db)
            .count_active_for_flights(&flight_ids)
            .await?;

        Ok(flights
            .into_iter()
            .map(|flight| FlightOverview {
                subscription_count: counts.get(&flight.id).copied().unwrap_or(0),
                flight,
            })
            .collect())
    }

    /// Updates a flight's status and notifies eligible subscribers.
    ///
    /// Each ACTIVE subscription that wants the resulting event gets one notification;
    /// `last_notified_at` is stamped only when the dispatcher accepted it. Delivery
    /// failures and failures to stamp are logged and skipped, since the status change is
    /// already stored at that point.
    ///
    /// # Returns
    /// - `Ok(FlightStatusUpdate)` - Updated flight, derived event and delivery count
    /// - `Err(SubscriptionError::FlightIdNotFound)` - No flight with that ID
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn update_status(
        &self,
        flight_id: i32,
        param: UpdateFlightStatusParam,
    ) -> Result<FlightStatusUpdate, AppError> {
        let flight_repo = FlightRepository::new(self.db);
        let subscription_repo = FlightSubscriptionRepository::new(self.db);

        let previous = flight_repo
            .find_by_id(flight_id)
            .await?
            .ok_or(SubscriptionError::FlightIdNotFound(flight_id))?;
        let updated = flight_repo.update_status(flight_id, param).await?;

        let event = FlightEvent::from_change(&previous, &updated);
        let mut notified = 0;

        if let Some(event) = event {
            let eligible = subscription_repo
                .find_active_by_flight_id(flight_id)
                .await?
                .into_iter()
                .filter(|subscription| event.is_eligible(subscription))
                .collect();

            for details in subscription_repo.expand(eligible).await? {
                if !self.notifications.notify_flight_event(&details, &event).await {
                    continue;
                }
                notified += 1;

                if let Err(e) = subscription_repo
                    .mark_notified(details.subscription.id, Utc::now())
                    .await
                {
                    tracing::warn!(
                        subscription_id = details.subscription.id,
                        flight_number = %updated.flight_number,
                        "Failed to stamp last notification time: {}",
                        e
                    );
                }
            }

            tracing::info!(
                flight_number = %updated.flight_number,
                event = event.notification_type().as_str(),
                notified,
                "Flight status updated"
            );
        }

        Ok(FlightStatusUpdate {
            overview: self.overview(updated).await?,
            event,
            notified,
        })
    }

    async fn overview(&self, flight: Flight) -> Result<FlightOverview, AppError> {
        let subscription_count = FlightSubscriptionRepository::new(self.db)
            .count_active_for_flight(flight.id)
            .await?;

        Ok(FlightOverview {
            flight,
            subscription_count,
        })
    }
}
